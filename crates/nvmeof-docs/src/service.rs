//! HTTP endpoints serving the documentation.
//!
//! [`DocsService`] answers three routes under its mount path (`/docs` by
//! default):
//!
//! | Route | Response |
//! |---|---|
//! | `GET {mount}` | Swagger UI page, `?all_endpoints=true` for the full document |
//! | `GET {mount}/api.json` | public OpenAPI document |
//! | `GET {mount}/api-all.json` | full OpenAPI document |

use std::convert::Infallible;
use std::future::{ready, Ready};
use std::sync::Arc;

use bytes::Bytes;
use http::header::{ALLOW, CONTENT_TYPE, HOST};
use http::{Method, Request, Response, StatusCode};
use http_body_util::Full;
use hyper::service::Service;
use tracing::{debug, error, warn};

use nvmeof_config::DocsConfig;

use crate::error::DocsResult;
use crate::generator::{SpecGenerator, SpecRequest};
use crate::registry::EndpointRegistry;
use crate::swagger::{extract_token, SwaggerUi};

/// Response type produced by the service.
pub type DocsResponse = Response<Full<Bytes>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Page,
    PublicSpec,
    FullSpec,
}

/// Serves the Swagger UI page and the OpenAPI documents.
#[derive(Debug, Clone)]
pub struct DocsService {
    registry: Arc<EndpointRegistry>,
    generator: SpecGenerator,
    config: DocsConfig,
}

impl DocsService {
    /// Serve `registry` with the default configuration.
    #[must_use]
    pub fn new(registry: Arc<EndpointRegistry>) -> Self {
        Self::from_config(registry, &DocsConfig::default())
    }

    /// Serve `registry` with the given documentation settings.
    #[must_use]
    pub fn from_config(registry: Arc<EndpointRegistry>, config: &DocsConfig) -> Self {
        Self {
            registry,
            generator: SpecGenerator::from_config(config),
            config: config.clone(),
        }
    }

    /// Path the routes are mounted under, without a trailing slash.
    #[must_use]
    pub fn mount_path(&self) -> &str {
        self.config.mount_path.trim_end_matches('/')
    }

    /// Handle a request. Failures become error responses.
    pub fn handle<B>(&self, req: &Request<B>) -> DocsResponse {
        let path = req.uri().path();
        let Some(route) = self.route(path) else {
            debug!(path = %path, "No documentation route");
            return error_response(StatusCode::NOT_FOUND, "Not found");
        };

        if req.method() != Method::GET {
            warn!(method = %req.method(), path = %path, "Method not allowed on documentation route");
            let mut response = error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
            response
                .headers_mut()
                .insert(ALLOW, http::HeaderValue::from_static("GET"));
            return response;
        }

        match self.respond(route, req) {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, path = %path, "Failed to serve documentation");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
            }
        }
    }

    fn route(&self, path: &str) -> Option<Route> {
        let mount = self.mount_path();
        let rest = path.strip_prefix(mount)?;
        match rest {
            "" | "/" => Some(Route::Page),
            "/api.json" => Some(Route::PublicSpec),
            "/api-all.json" => Some(Route::FullSpec),
            _ => None,
        }
    }

    fn respond<B>(&self, route: Route, req: &Request<B>) -> DocsResult<DocsResponse> {
        let origin = request_origin(req);
        match route {
            Route::Page => {
                let html = SwaggerUi::from_config(origin, &self.config)
                    .token(extract_token(req.headers()))
                    .html_bytes(wants_all_endpoints(req));
                Ok(Response::builder()
                    .status(StatusCode::OK)
                    .header(CONTENT_TYPE, "text/html; charset=utf-8")
                    .body(Full::new(html))?)
            }
            Route::PublicSpec => self.spec_response(&SpecRequest::public(origin)),
            Route::FullSpec => self.spec_response(&SpecRequest::all(origin)),
        }
    }

    fn spec_response(&self, request: &SpecRequest) -> DocsResult<DocsResponse> {
        let json = self.generator.generate_json(&self.registry, request)?;
        Ok(Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(json)))?)
    }
}

impl<B> Service<Request<B>> for DocsService {
    type Response = DocsResponse;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, req: Request<B>) -> Self::Future {
        ready(Ok(self.handle(&req)))
    }
}

/// `http://` plus the `Host` header, the URI authority, or `localhost`.
fn request_origin<B>(req: &Request<B>) -> String {
    let host = req
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| req.uri().authority().map(ToString::to_string))
        .unwrap_or_else(|| "localhost".to_string());
    format!("http://{host}")
}

fn wants_all_endpoints<B>(req: &Request<B>) -> bool {
    req.uri()
        .query()
        .into_iter()
        .flat_map(|query| query.split('&'))
        .filter_map(|pair| pair.split_once('='))
        .any(|(key, value)| {
            key == "all_endpoints"
                && ["true", "1", "yes"]
                    .iter()
                    .any(|accepted| value.eq_ignore_ascii_case(accepted))
        })
}

fn error_response(status: StatusCode, message: &str) -> DocsResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, http::HeaderValue::from_static("application/json"));
    response
}
