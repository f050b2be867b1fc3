//! OpenAPI document types.
//!
//! The subset of the OpenAPI 3.0 object model the generator emits, plus the
//! legacy `host`, `basePath` and `schemes` root fields that the gateway's
//! clients still read.
//!
//! <https://spec.openapis.org/oas/v3.0.3>

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::registry::EndpointMethod;

/// Media type used for every request and response body.
pub const APPLICATION_JSON: &str = "application/json";

/// OpenAPI document root object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApi {
    /// OpenAPI version ("3.0.0").
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// Authority the document was generated for.
    pub host: String,
    /// Base path all operation paths are relative to.
    #[serde(rename = "basePath")]
    pub base_path: String,
    /// Available servers.
    #[serde(default)]
    pub servers: Vec<Server>,
    /// Tags for API grouping.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Transfer protocols.
    #[serde(default)]
    pub schemes: Vec<String>,
    /// API paths and operations.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components.
    #[serde(default)]
    pub components: Components,
}

/// API metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// API version.
    pub version: String,
}

/// Server information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Server URL.
    pub url: String,
}

/// Operations available on a single path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
}

impl PathItem {
    /// Store `operation` under `method`, replacing any previous one.
    pub fn set_operation(&mut self, method: EndpointMethod, operation: Operation) {
        let slot = match method {
            EndpointMethod::Get => &mut self.get,
            EndpointMethod::Post => &mut self.post,
            EndpointMethod::Put => &mut self.put,
            EndpointMethod::Delete => &mut self.delete,
        };
        *slot = Some(operation);
    }

    /// The operation registered for `method`, if any.
    #[must_use]
    pub fn operation(&self, method: EndpointMethod) -> Option<&Operation> {
        match method {
            EndpointMethod::Get => self.get.as_ref(),
            EndpointMethod::Post => self.post.as_ref(),
            EndpointMethod::Put => self.put.as_ref(),
            EndpointMethod::Delete => self.delete.as_ref(),
        }
    }

    /// Number of operations on this path.
    #[must_use]
    pub fn len(&self) -> usize {
        [&self.get, &self.post, &self.put, &self.delete]
            .iter()
            .filter(|op| op.is_some())
            .count()
    }

    /// Whether no operation is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Tags for grouping.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Full description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Path and query parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    pub responses: IndexMap<String, Response>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// Query string parameter.
    Query,
    /// URL path parameter.
    Path,
}

/// An operation parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Parameter schema.
    pub schema: Schema,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether required.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Whether the parameter may be sent without a value.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    #[serde(rename = "allowEmptyValue")]
    pub allow_empty_value: bool,
}

/// Request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Content by media type.
    pub content: IndexMap<String, MediaType>,
}

impl RequestBody {
    /// A JSON request body with the given schema.
    #[must_use]
    pub fn json(schema: Schema) -> Self {
        Self {
            content: json_content(schema),
        }
    }

    /// The JSON schema of this body, if present.
    #[must_use]
    pub fn json_schema(&self) -> Option<&Schema> {
        self.content
            .get(APPLICATION_JSON)
            .and_then(|media| media.schema.as_ref())
    }
}

/// Media type content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Response definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Description (required).
    pub description: String,
    /// Response content by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    /// A response with no body.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: IndexMap::new(),
        }
    }

    /// Set the JSON body schema.
    #[must_use]
    pub fn with_json(mut self, schema: Schema) -> Self {
        self.content = json_content(schema);
        self
    }

    /// The JSON schema of this response, if present.
    #[must_use]
    pub fn json_schema(&self) -> Option<&Schema> {
        self.content
            .get(APPLICATION_JSON)
            .and_then(|media| media.schema.as_ref())
    }
}

fn json_content(schema: Schema) -> IndexMap<String, MediaType> {
    let mut content = IndexMap::new();
    content.insert(
        APPLICATION_JSON.to_string(),
        MediaType {
            schema: Some(schema),
        },
    );
    content
}

/// Reusable components. The generator leaves this empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    /// Reusable schemas.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Schema>,
}

/// API tag for grouping operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Description.
    pub description: String,
}

/// Schema primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// Object type.
    #[default]
    Object,
    /// Array type.
    Array,
    /// String type.
    String,
    /// Integer type.
    Integer,
    /// Boolean type.
    Boolean,
    /// Number type.
    Number,
}

impl SchemaType {
    /// The lowercase OpenAPI name of this type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Number => "number",
        }
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object properties.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    /// Required properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Array item schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl Schema {
    /// A schema of the given primitive type.
    #[must_use]
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    /// Create an object schema.
    #[must_use]
    pub fn object() -> Self {
        Self::of_type(SchemaType::Object)
    }

    /// Create an array schema with the given item schema.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    /// Add a property to an object schema.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark a property as required.
    #[must_use]
    pub fn required_property(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_builders() {
        let array = Schema::array(Schema::of_type(SchemaType::String));
        assert_eq!(array.schema_type, Some(SchemaType::Array));
        assert!(array.items.is_some());

        let object = Schema::object()
            .property("name", Schema::of_type(SchemaType::String))
            .required_property("name");
        assert_eq!(object.schema_type, Some(SchemaType::Object));
        assert!(object.properties.contains_key("name"));
        assert_eq!(object.required, vec!["name".to_string()]);
    }

    #[test]
    fn test_schema_serialization_skips_empty() {
        let value = serde_json::to_value(Schema::object()).unwrap();
        assert_eq!(value, json!({"type": "object"}));
    }

    #[test]
    fn test_schema_type_names() {
        assert_eq!(SchemaType::Integer.to_string(), "integer");
        assert_eq!(
            serde_json::to_value(SchemaType::Boolean).unwrap(),
            json!("boolean")
        );
    }

    #[test]
    fn test_parameter_serialization() {
        let param = Parameter {
            name: "nqn".to_string(),
            location: ParameterIn::Query,
            schema: Schema::of_type(SchemaType::String),
            description: None,
            required: false,
            allow_empty_value: true,
        };

        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value["in"], "query");
        assert_eq!(value["allowEmptyValue"], true);
        assert!(value.get("required").is_none());
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_path_item_set_operation() {
        let mut item = PathItem::default();
        assert!(item.is_empty());

        item.set_operation(
            EndpointMethod::Delete,
            Operation {
                tags: vec!["Subsystem".to_string()],
                summary: None,
                description: None,
                parameters: vec![],
                request_body: None,
                responses: IndexMap::new(),
            },
        );

        assert_eq!(item.len(), 1);
        assert!(item.operation(EndpointMethod::Delete).is_some());
        assert!(item.operation(EndpointMethod::Get).is_none());

        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("delete").is_some());
        assert!(value.get("get").is_none());
    }

    #[test]
    fn test_response_json_content() {
        let response = Response::new("OK").with_json(Schema::object());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "description": "OK",
                "content": {"application/json": {"schema": {"type": "object"}}}
            })
        );
        assert_eq!(response.json_schema(), Some(&Schema::object()));
    }

    #[test]
    fn test_components_serialize_as_empty_object() {
        let value = serde_json::to_value(Components::default()).unwrap();
        assert_eq!(value, json!({}));
    }
}
