//! OpenAPI document assembly.

use tracing::debug;

use nvmeof_config::DocsConfig;

use crate::error::DocsResult;
use crate::openapi::{Components, Info, OpenApi, Server};
use crate::paths::build_paths;
use crate::registry::EndpointRegistry;
use crate::tags::build_tags;

/// OpenAPI version emitted in every document.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// Parameters of one document request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRequest {
    /// Include internal endpoints.
    pub all_endpoints: bool,
    /// Base path the public document is relative to.
    pub base_url: String,
    /// `scheme://authority` the request arrived on.
    pub origin: String,
    /// Generate a static copy that does not depend on the request.
    pub offline: bool,
}

impl SpecRequest {
    /// The public document as served from `origin`.
    #[must_use]
    pub fn public(origin: impl Into<String>) -> Self {
        Self {
            all_endpoints: false,
            base_url: "/".to_string(),
            origin: origin.into(),
            offline: false,
        }
    }

    /// The full document, internal endpoints included.
    #[must_use]
    pub fn all(origin: impl Into<String>) -> Self {
        Self {
            all_endpoints: true,
            ..Self::public(origin)
        }
    }

    /// Set the base url.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Generate an offline copy.
    #[must_use]
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    fn host(&self) -> &str {
        self.origin
            .split_once("://")
            .map_or(self.origin.as_str(), |(_, authority)| authority)
    }
}

/// Generates OpenAPI documents from an endpoint registry.
///
/// # Example
///
/// ```
/// use nvmeof_docs::{EndpointRegistry, SpecGenerator, SpecRequest};
///
/// let generator = SpecGenerator::new().title("Gateway API");
/// let spec = generator
///     .generate(&EndpointRegistry::new(), &SpecRequest::public("http://localhost:5500"))
///     .unwrap();
///
/// assert_eq!(spec.info.title, "Gateway API");
/// assert_eq!(spec.host, "localhost:5500");
/// ```
#[derive(Debug, Clone)]
pub struct SpecGenerator {
    title: String,
    description: String,
    version: String,
    offline_host: String,
}

impl Default for SpecGenerator {
    fn default() -> Self {
        Self::from_config(&DocsConfig::default())
    }
}

impl SpecGenerator {
    /// Create a generator with the default API metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator from the documentation config section.
    #[must_use]
    pub fn from_config(config: &DocsConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            version: config.version.clone(),
            offline_host: config.offline_host.clone(),
        }
    }

    /// Set the API title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the API description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the API version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the host placed in offline documents.
    #[must_use]
    pub fn offline_host(mut self, host: impl Into<String>) -> Self {
        self.offline_host = host.into();
        self
    }

    /// Generate the document.
    ///
    /// # Errors
    ///
    /// Returns `DocsError::InvalidDescriptor` if a registered endpoint has an
    /// empty or duplicate parameter name.
    pub fn generate(&self, registry: &EndpointRegistry, request: &SpecRequest) -> DocsResult<OpenApi> {
        registry.validate()?;

        let host = if request.offline {
            self.offline_host.clone()
        } else {
            request.host().to_string()
        };

        let base_path = if request.all_endpoints || request.base_url.is_empty() {
            "/".to_string()
        } else {
            request.base_url.clone()
        };

        let server_url = if request.offline {
            base_path.clone()
        } else {
            format!("{}{}", request.origin, base_path)
        };

        let scheme = if request.offline { "https" } else { "http" };

        let paths = build_paths(registry, request.all_endpoints);
        let tags = build_tags(registry, request.all_endpoints);

        debug!(
            host = %host,
            paths = paths.len(),
            tags = tags.len(),
            all_endpoints = request.all_endpoints,
            "Generated OpenAPI document"
        );

        Ok(OpenApi {
            openapi: OPENAPI_VERSION.to_string(),
            info: Info {
                title: self.title.clone(),
                description: Some(self.description.clone()),
                version: self.version.clone(),
            },
            host,
            base_path,
            servers: vec![Server { url: server_url }],
            tags,
            schemes: vec![scheme.to_string()],
            paths,
            components: Components::default(),
        })
    }

    /// Generate the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if generation or serialization fails.
    pub fn generate_json(&self, registry: &EndpointRegistry, request: &SpecRequest) -> DocsResult<String> {
        let spec = self.generate(registry, request)?;
        Ok(serde_json::to_string_pretty(&spec)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocsError;
    use crate::registry::{Controller, EndpointDescriptor, EndpointMethod, ParamDescriptor};
    use std::sync::Arc;

    fn registry() -> EndpointRegistry {
        let mut registry = EndpointRegistry::new();
        registry.register(
            "/subsystems",
            EndpointDescriptor::new(EndpointMethod::Get, Arc::new(Controller::new("Subsystem"))),
        );
        registry
    }

    #[test]
    fn test_defaults_from_config() {
        let spec = SpecGenerator::new()
            .generate(&registry(), &SpecRequest::public("http://gw:5500"))
            .unwrap();

        assert_eq!(spec.openapi, "3.0.0");
        assert_eq!(spec.info.title, "ceph-nvmeof REST API");
        assert_eq!(
            spec.info.description.as_deref(),
            Some("This is the official Ceph NVMeOF API")
        );
        assert_eq!(spec.info.version, "v1");
    }

    #[test]
    fn test_online_host_and_servers() {
        let spec = SpecGenerator::new()
            .generate(&registry(), &SpecRequest::public("http://gw:5500"))
            .unwrap();

        assert_eq!(spec.host, "gw:5500");
        assert_eq!(spec.base_path, "/");
        assert_eq!(spec.servers[0].url, "http://gw:5500/");
        assert_eq!(spec.schemes, vec!["http"]);
    }

    #[test]
    fn test_offline_document() {
        let request = SpecRequest::public("http://gw:5500").base_url("/api").offline();
        let spec = SpecGenerator::new().generate(&registry(), &request).unwrap();

        assert_eq!(spec.host, "example.com");
        assert_eq!(spec.base_path, "/api");
        assert_eq!(spec.servers[0].url, "/api");
        assert_eq!(spec.schemes, vec!["https"]);
    }

    #[test]
    fn test_all_endpoints_resets_base_path() {
        let request = SpecRequest::all("http://gw").base_url("/api");
        let spec = SpecGenerator::new().generate(&registry(), &request).unwrap();
        assert_eq!(spec.base_path, "/");
        assert_eq!(spec.servers[0].url, "http://gw/");
    }

    #[test]
    fn test_empty_base_url() {
        let request = SpecRequest::public("http://gw").base_url("");
        let spec = SpecGenerator::new().generate(&registry(), &request).unwrap();
        assert_eq!(spec.base_path, "/");
    }

    #[test]
    fn test_custom_metadata() {
        let config = DocsConfig {
            offline_host: "gateway.example".to_string(),
            ..DocsConfig::default()
        };
        let spec = SpecGenerator::from_config(&config)
            .title("Gateway")
            .version("v2")
            .description("Custom")
            .generate(&registry(), &SpecRequest::public("http://gw").offline())
            .unwrap();

        assert_eq!(spec.info.title, "Gateway");
        assert_eq!(spec.info.version, "v2");
        assert_eq!(spec.host, "gateway.example");
    }

    #[test]
    fn test_invalid_registry_fails() {
        let mut registry = registry();
        registry.register(
            "/hosts",
            EndpointDescriptor::new(EndpointMethod::Get, Arc::new(Controller::new("Host")))
                .query_param(ParamDescriptor::optional("")),
        );

        let err = SpecGenerator::new()
            .generate(&registry, &SpecRequest::public("http://gw"))
            .unwrap_err();
        assert!(matches!(err, DocsError::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_generate_json() {
        let json = SpecGenerator::new()
            .generate_json(&registry(), &SpecRequest::public("http://gw"))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["basePath"], "/");
        assert_eq!(value["components"], serde_json::json!({}));
        assert!(value["paths"]["/subsystems"]["get"].is_object());
        assert_eq!(value["tags"][0]["name"], "Subsystem");
    }
}
