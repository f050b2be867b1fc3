//! Endpoint registry model.
//!
//! The host framework collects its routes into an [`EndpointRegistry`]
//! snapshot and hands it to the generator. Everything here is plain data:
//! the documentation core only reads it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nvmeof_docs::{Controller, EndpointDescriptor, EndpointMethod, EndpointRegistry, ParamDescriptor};
//!
//! let pool = Arc::new(Controller::new("Pool"));
//! let mut registry = EndpointRegistry::new();
//! registry.register(
//!     "/pools",
//!     EndpointDescriptor::new(EndpointMethod::Get, pool)
//!         .query_param(ParamDescriptor::optional("count")),
//! );
//!
//! assert_eq!(registry.len(), 1);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DocsError, DocsResult};
use crate::openapi::SchemaType;

/// HTTP method of a documented endpoint.
///
/// The derived ordering is the order operations appear under a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EndpointMethod {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// DELETE.
    Delete,
}

impl EndpointMethod {
    /// Lowercase name, as used for operation keys.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }

    /// Whether operations with this method document a request body.
    #[must_use]
    pub fn accepts_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for EndpointMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

impl TryFrom<&http::Method> for EndpointMethod {
    type Error = DocsError;

    fn try_from(method: &http::Method) -> DocsResult<Self> {
        match *method {
            http::Method::GET => Ok(Self::Get),
            http::Method::POST => Ok(Self::Post),
            http::Method::PUT => Ok(Self::Put),
            http::Method::DELETE => Ok(Self::Delete),
            _ => Err(DocsError::UnsupportedMethod(method.to_string())),
        }
    }
}

/// Declared native type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeType {
    /// Text.
    Str,
    /// Whole number.
    Int,
    /// Boolean flag.
    Bool,
    /// Floating point number.
    Float,
    /// Variable-length sequence.
    List,
    /// Fixed-size sequence.
    Tuple,
    /// Sequence whose element type is given, e.g. `[int]`.
    ListOf(Box<NativeType>),
    /// Mapping.
    Dict,
    /// Any other declared type, by name.
    Other(String),
}

/// A parameter extracted from a route or handler signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Parameter name, unique within its list.
    pub name: String,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Default value. `None` and JSON `null` both mean "no default".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Declared type. Inferred when absent.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<NativeType>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields of a structured parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_params: Option<Vec<ParamDescriptor>>,
}

impl ParamDescriptor {
    fn with_required(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            default: None,
            param_type: None,
            description: None,
            nested_params: None,
        }
    }

    /// A required parameter.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self::with_required(name, true)
    }

    /// An optional parameter.
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self::with_required(name, false)
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the declared type.
    #[must_use]
    pub fn with_type(mut self, param_type: NativeType) -> Self {
        self.param_type = Some(param_type);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the nested fields.
    #[must_use]
    pub fn with_nested(mut self, nested: Vec<ParamDescriptor>) -> Self {
        self.nested_params = Some(nested);
        self
    }

    /// The default value, treating JSON `null` as absent.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref().filter(|v| !v.is_null())
    }
}

/// Author-supplied documentation for a parameter.
///
/// A non-nested override describes an existing top-level parameter by name.
/// A nested override describes a field inside a structured parameter and is
/// added as a new parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamOverride {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub param_type: NativeType,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the field must be supplied (nested overrides only).
    #[serde(default)]
    pub required: bool,
    /// Default value (nested overrides only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Fields of a structured parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_params: Option<Vec<ParamOverride>>,
    /// Whether this describes a field nested inside another parameter.
    #[serde(default)]
    pub nested: bool,
}

impl ParamOverride {
    fn build(name: impl Into<String>, param_type: NativeType, nested: bool) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: None,
            required: false,
            default: None,
            nested_params: None,
            nested,
        }
    }

    /// Override for an existing top-level parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, param_type: NativeType) -> Self {
        Self::build(name, param_type, false)
    }

    /// Description of a field nested inside a structured parameter.
    #[must_use]
    pub fn nested(name: impl Into<String>, param_type: NativeType) -> Self {
        Self::build(name, param_type, true)
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the field as required.
    #[must_use]
    pub fn mark_required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the nested fields.
    #[must_use]
    pub fn with_nested(mut self, nested: Vec<ParamOverride>) -> Self {
        self.nested_params = Some(nested);
        self
    }

    /// Read the override as a full parameter descriptor, without merging.
    #[must_use]
    pub fn to_descriptor(&self) -> ParamDescriptor {
        ParamDescriptor {
            name: self.name.clone(),
            required: self.required,
            default: self.default.clone(),
            param_type: Some(self.param_type.clone()),
            description: self.description.clone(),
            nested_params: self
                .nested_params
                .as_ref()
                .map(|nested| nested.iter().map(Self::to_descriptor).collect()),
        }
    }
}

/// Input to the schema builder: a parameter list plus its top-level type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaInput {
    /// Top-level schema type.
    #[serde(default, rename = "type")]
    pub schema_type: SchemaType,
    /// Fields.
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
}

impl SchemaInput {
    /// An object whose properties are `params`.
    #[must_use]
    pub fn object(params: Vec<ParamDescriptor>) -> Self {
        Self {
            schema_type: SchemaType::Object,
            params,
        }
    }

    /// An array of objects whose properties are `params`.
    #[must_use]
    pub fn array(params: Vec<ParamDescriptor>) -> Self {
        Self {
            schema_type: SchemaType::Array,
            params,
        }
    }
}

impl From<Vec<ParamDescriptor>> for SchemaInput {
    fn from(params: Vec<ParamDescriptor>) -> Self {
        Self::object(params)
    }
}

/// Controller-level documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerDocInfo {
    /// Tag name replacing the controller name.
    #[serde(default)]
    pub tag: Option<String>,
    /// Tag description.
    #[serde(default)]
    pub tag_description: Option<String>,
}

/// A logical group of endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controller {
    name: String,
    doc: Option<ControllerDocInfo>,
}

impl Controller {
    /// A controller without documentation.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
        }
    }

    /// Attach a tag override and description.
    #[must_use]
    pub fn with_doc(mut self, tag: Option<&str>, tag_description: Option<&str>) -> Self {
        self.doc = Some(ControllerDocInfo {
            tag: tag.map(str::to_string),
            tag_description: tag_description.map(str::to_string),
        });
        self
    }

    /// Identifying name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached documentation.
    #[must_use]
    pub fn doc(&self) -> Option<&ControllerDocInfo> {
        self.doc.as_ref()
    }

    /// Declared tag override, ignoring empty strings.
    #[must_use]
    pub fn tag_override(&self) -> Option<&str> {
        self.doc
            .as_ref()
            .and_then(|doc| doc.tag.as_deref())
            .filter(|tag| !tag.is_empty())
    }

    /// Tag this controller's endpoints are grouped under by default.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        self.tag_override().unwrap_or(&self.name)
    }

    /// Declared tag description, or empty.
    #[must_use]
    pub fn tag_description(&self) -> &str {
        self.doc
            .as_ref()
            .and_then(|doc| doc.tag_description.as_deref())
            .unwrap_or("")
    }
}

/// Handler-level documentation. Every field is optional.
///
/// Tag descriptions come from controllers only; a handler's
/// `tagDescription` is accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandlerDocInfo {
    /// Short summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Tag overriding the controller's.
    #[serde(default)]
    pub tag: Option<String>,
    /// Response body descriptions keyed by status code.
    #[serde(default)]
    pub response: IndexMap<String, SchemaInput>,
    /// Parameter overrides.
    #[serde(default)]
    pub parameters: Vec<ParamOverride>,
}

impl HandlerDocInfo {
    /// Empty documentation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the summary.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Describe the body of the response with `status`.
    #[must_use]
    pub fn response(mut self, status: impl Into<String>, body: impl Into<SchemaInput>) -> Self {
        self.response.insert(status.into(), body.into());
        self
    }

    /// Add a parameter override.
    #[must_use]
    pub fn parameter(mut self, param: ParamOverride) -> Self {
        self.parameters.push(param);
        self
    }
}

/// One (path, method) registration.
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    /// HTTP method.
    pub method: EndpointMethod,
    /// Owning controller.
    pub controller: Arc<Controller>,
    /// Attached documentation.
    pub handler_doc: Option<HandlerDocInfo>,
    /// Handler documentation text.
    pub description: Option<String>,
    /// Path parameters.
    pub path_params: Vec<ParamDescriptor>,
    /// Query parameters.
    pub query_params: Vec<ParamDescriptor>,
    /// Body parameters.
    pub body_params: Vec<ParamDescriptor>,
    /// Body parameters are already described by an external schema; the
    /// handler's parameter overrides are the body fields.
    pub body_schema_described: bool,
    /// Backend-only endpoint, hidden from the public document.
    pub internal_only: bool,
}

impl EndpointDescriptor {
    /// An endpoint with no parameters or documentation.
    #[must_use]
    pub fn new(method: EndpointMethod, controller: Arc<Controller>) -> Self {
        Self {
            method,
            controller,
            handler_doc: None,
            description: None,
            path_params: Vec::new(),
            query_params: Vec::new(),
            body_params: Vec::new(),
            body_schema_described: false,
            internal_only: false,
        }
    }

    /// Attach handler documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: HandlerDocInfo) -> Self {
        self.handler_doc = Some(doc);
        self
    }

    /// Set the handler description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a path parameter.
    #[must_use]
    pub fn path_param(mut self, param: ParamDescriptor) -> Self {
        self.path_params.push(param);
        self
    }

    /// Add a query parameter.
    #[must_use]
    pub fn query_param(mut self, param: ParamDescriptor) -> Self {
        self.query_params.push(param);
        self
    }

    /// Add a body parameter.
    #[must_use]
    pub fn body_param(mut self, param: ParamDescriptor) -> Self {
        self.body_params.push(param);
        self
    }

    /// Mark the body as described by an external schema.
    #[must_use]
    pub fn body_schema_described(mut self) -> Self {
        self.body_schema_described = true;
        self
    }

    /// Mark the endpoint as backend-only.
    #[must_use]
    pub fn internal_only(mut self) -> Self {
        self.internal_only = true;
        self
    }

    /// Parameter overrides from the handler documentation.
    #[must_use]
    pub fn doc_parameters(&self) -> &[ParamOverride] {
        self.handler_doc
            .as_ref()
            .map_or(&[], |doc| doc.parameters.as_slice())
    }

    /// Whether the endpoint is listed when internal endpoints are excluded
    /// unless `include_internal` is set.
    #[must_use]
    pub fn is_visible(&self, include_internal: bool) -> bool {
        !self.internal_only || include_internal
    }

    /// Check the descriptor shape contract.
    ///
    /// # Errors
    ///
    /// Returns `DocsError::InvalidDescriptor` if a parameter or override has
    /// an empty name, or a registry parameter list repeats a name.
    pub fn validate(&self, path: &str) -> DocsResult<()> {
        let fail = |reason: String| {
            Err(DocsError::invalid_descriptor(
                path,
                self.method.to_string(),
                reason,
            ))
        };

        for (kind, params) in [
            ("path", &self.path_params),
            ("query", &self.query_params),
            ("body", &self.body_params),
        ] {
            let mut seen = HashSet::new();
            for param in params {
                if !seen.insert(param.name.as_str()) {
                    return fail(format!("duplicate {kind} parameter '{}'", param.name));
                }
            }
            if let Some(reason) = first_unnamed_descriptor(params) {
                return fail(format!("{kind} parameter {reason}"));
            }
        }

        if let Some(reason) = first_unnamed_override(self.doc_parameters()) {
            return fail(format!("documented parameter {reason}"));
        }

        Ok(())
    }
}

fn first_unnamed_descriptor(params: &[ParamDescriptor]) -> Option<String> {
    params.iter().find_map(|param| {
        if param.name.trim().is_empty() {
            return Some("has an empty name".to_string());
        }
        param
            .nested_params
            .as_deref()
            .and_then(first_unnamed_descriptor)
            .map(|reason| format!("'{}' has a nested field that {reason}", param.name))
    })
}

fn first_unnamed_override(params: &[ParamOverride]) -> Option<String> {
    params.iter().find_map(|param| {
        if param.name.trim().is_empty() {
            return Some("has an empty name".to_string());
        }
        param
            .nested_params
            .as_deref()
            .and_then(first_unnamed_override)
            .map(|reason| format!("'{}' has a nested field that {reason}", param.name))
    })
}

/// Read-only snapshot of the registered endpoints, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    endpoints: BTreeMap<String, Vec<EndpointDescriptor>>,
}

impl EndpointRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an endpoint under `path`.
    pub fn register(&mut self, path: impl Into<String>, endpoint: EndpointDescriptor) -> &mut Self {
        self.endpoints.entry(path.into()).or_default().push(endpoint);
        self
    }

    /// Paths in ascending lexical order with their endpoints.
    pub fn paths(&self) -> impl Iterator<Item = (&str, &[EndpointDescriptor])> {
        self.endpoints
            .iter()
            .map(|(path, endpoints)| (path.as_str(), endpoints.as_slice()))
    }

    /// Every registered endpoint.
    pub fn endpoints(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.endpoints.values().flatten()
    }

    /// Number of registered paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Validate every endpoint.
    ///
    /// # Errors
    ///
    /// Returns the first `DocsError::InvalidDescriptor` found.
    pub fn validate(&self) -> DocsResult<()> {
        for (path, endpoints) in self.paths() {
            for endpoint in endpoints {
                endpoint.validate(path)?;
            }
        }
        Ok(())
    }
}
