//! # NVMe-oF Gateway Docs
//!
//! OpenAPI documentation for the gateway's REST API.
//!
//! This crate provides:
//! - **Endpoint registry model** the web layer fills with its routes
//! - **OpenAPI 3.0 generation** from the registry, merging declared and
//!   inferred parameter metadata
//! - **Swagger UI** page with the caller's token pre-authorized
//! - **HTTP service** serving the page and both JSON documents
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use nvmeof_docs::{
//!     Controller, EndpointDescriptor, EndpointMethod, EndpointRegistry, ParamDescriptor,
//!     SpecGenerator, SpecRequest,
//! };
//!
//! let pool = Arc::new(Controller::new("Pool"));
//! let mut registry = EndpointRegistry::new();
//! registry.register(
//!     "/pools",
//!     EndpointDescriptor::new(EndpointMethod::Get, pool)
//!         .query_param(ParamDescriptor::optional("count")),
//! );
//!
//! let spec = SpecGenerator::new()
//!     .generate(&registry, &SpecRequest::public("http://localhost:5500"))?;
//! assert!(spec.paths["/pools"].get.is_some());
//! # Ok::<(), nvmeof_docs::DocsError>(())
//! ```
//!
//! Serving the documentation:
//!
//! ```rust,ignore
//! use nvmeof_docs::DocsService;
//!
//! let docs = DocsService::from_config(Arc::new(registry), &config.docs);
//! // hand `docs` to the server as a hyper service
//! ```

mod error;
mod generator;
mod openapi;
mod params;
mod paths;
mod registry;
mod responses;
mod schema;
mod service;
mod swagger;
mod tags;
mod types;

pub use error::{DocsError, DocsResult};
pub use generator::{SpecGenerator, SpecRequest, OPENAPI_VERSION};
pub use openapi::{
    Components, Info, MediaType, OpenApi, Operation, Parameter, ParameterIn, PathItem,
    RequestBody, Response, Schema, SchemaType, Server, Tag, APPLICATION_JSON,
};
pub use params::{build_parameters, merge_overrides, merged};
pub use paths::build_paths;
pub use registry::{
    Controller, ControllerDocInfo, EndpointDescriptor, EndpointMethod, EndpointRegistry,
    HandlerDocInfo, NativeType, ParamDescriptor, ParamOverride, SchemaInput,
};
pub use responses::build_responses;
pub use schema::build_schema;
pub use service::{DocsResponse, DocsService};
pub use swagger::{extract_token, SwaggerUi, TOKEN_COOKIE};
pub use tags::{build_tags, resolve_tag, NO_DESCRIPTION_AVAILABLE};
pub use types::{infer_type, map_native_type, resolve_type};
