//! Swagger UI page.
//!
//! The page loads the Swagger UI bundle and stylesheet from the gateway's own
//! static files, points it at one of the two JSON documents, and pre-fills
//! the caller's bearer token so "Try it out" requests are authenticated.
//!
//! ## Usage
//!
//! ```
//! use nvmeof_docs::SwaggerUi;
//!
//! let page = SwaggerUi::new("http://gw:5500").token("secret").html(false);
//! assert!(page.contains("http://gw:5500/docs/api.json"));
//! ```

use http::header::{AUTHORIZATION, COOKIE};
use http::HeaderMap;

use nvmeof_config::DocsConfig;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Swagger UI page configuration and HTML generation.
#[derive(Debug, Clone)]
pub struct SwaggerUi {
    /// `scheme://authority` the documents are fetched from.
    origin: String,
    /// Path the documentation endpoints are mounted under.
    mount_path: String,
    /// URL prefix of the Swagger UI assets.
    static_prefix: String,
    /// Bearer token passed to `preauthorizeApiKey`.
    token: String,
}

impl SwaggerUi {
    /// Page for documents served from `origin`, with default paths.
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self::from_config(origin, &DocsConfig::default())
    }

    /// Page with mount path and static prefix taken from the config.
    #[must_use]
    pub fn from_config(origin: impl Into<String>, config: &DocsConfig) -> Self {
        Self {
            origin: origin.into(),
            mount_path: config.mount_path.clone(),
            static_prefix: config.static_prefix.clone(),
            token: String::new(),
        }
    }

    /// Set the token to pre-authorize with.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Set the static asset prefix.
    #[must_use]
    pub fn static_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.static_prefix = prefix.into();
        self
    }

    /// URL of the document the page displays.
    #[must_use]
    pub fn spec_url(&self, all_endpoints: bool) -> String {
        let file = if all_endpoints { "api-all.json" } else { "api.json" };
        format!(
            "{}{}/{}",
            self.origin,
            self.mount_path.trim_end_matches('/'),
            file
        )
    }

    /// Generate the HTML page.
    #[must_use]
    pub fn html(&self, all_endpoints: bool) -> String {
        let assets = self.static_prefix.trim_end_matches('/');

        format!(
            r##"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="referrer" content="no-referrer" />
    <link rel="stylesheet" type="text/css" href="{assets}/swagger-ui.css" >
    <style>
        html {{
            box-sizing: border-box;
            overflow: -moz-scrollbars-vertical;
            overflow-y: scroll;
        }}
        *,
        *:before,
        *:after {{
            box-sizing: inherit;
        }}
        body {{
            margin: 0;
            background: #fafafa;
        }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="{assets}/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            const ui = SwaggerUIBundle({{
                url: {spec_url},
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis
                ],
                layout: "BaseLayout",
                onComplete: () => {{
                    ui.preauthorizeApiKey('jwt', {token});
                }}
            }});
            window.ui = ui;
        }};
    </script>
</body>
</html>"##,
            assets = html_escape(assets),
            spec_url = js_string(&self.spec_url(all_endpoints)),
            token = js_string(&self.token),
        )
    }

    /// Generate the HTML as bytes for use in HTTP responses.
    #[must_use]
    pub fn html_bytes(&self, all_endpoints: bool) -> bytes::Bytes {
        bytes::Bytes::from(self.html(all_endpoints))
    }
}

/// Token of the caller: the `token` cookie, else an `Authorization: Bearer`
/// credential, else empty.
#[must_use]
pub fn extract_token(headers: &HeaderMap) -> String {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == TOKEN_COOKIE)
        .map(|(_, value)| value.trim().trim_matches('"').to_string());

    if let Some(token) = from_cookie {
        return token;
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim().to_string())
        .unwrap_or_default()
}

/// Quote a value as a JavaScript string literal safe inside `<script>`.
fn js_string(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('<', "\\u003c")
}

/// Simple HTML escape for attribute values.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_spec_url() {
        let ui = SwaggerUi::new("http://gw:5500");
        assert_eq!(ui.spec_url(false), "http://gw:5500/docs/api.json");
        assert_eq!(ui.spec_url(true), "http://gw:5500/docs/api-all.json");
    }

    #[test]
    fn test_spec_url_custom_mount() {
        let config = DocsConfig {
            mount_path: "/api/docs/".to_string(),
            ..DocsConfig::default()
        };
        let ui = SwaggerUi::from_config("https://gw", &config);
        assert_eq!(ui.spec_url(false), "https://gw/api/docs/api.json");
    }

    #[test]
    fn test_html_generation() {
        let html = SwaggerUi::new("http://gw").token("abc").html(true);

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains(r#"href="/static/swagger-ui.css""#));
        assert!(html.contains(r#"src="/static/swagger-ui-bundle.js""#));
        assert!(html.contains(r#"url: "http://gw/docs/api-all.json""#));
        assert!(html.contains(r#"ui.preauthorizeApiKey('jwt', "abc");"#));
    }

    #[test]
    fn test_static_prefix() {
        let html = SwaggerUi::new("http://gw").static_prefix("/assets/").html(false);
        assert!(html.contains(r#"href="/assets/swagger-ui.css""#));
    }

    #[test]
    fn test_token_is_escaped() {
        let html = SwaggerUi::new("http://gw")
            .token("x'</script><script>alert(1)")
            .html(false);

        assert!(!html.contains("</script><script>alert"));
        assert!(html.contains(r#""x'\u003c/script>\u003cscript>alert(1)""#));
    }

    #[test]
    fn test_empty_token() {
        let html = SwaggerUi::new("http://gw").html(false);
        assert!(html.contains(r#"ui.preauthorizeApiKey('jwt', "");"#));
    }

    #[test]
    fn test_extract_token_cookie_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; token=from-cookie"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));

        assert_eq!(extract_token(&headers), "from-cookie");
    }

    #[test]
    fn test_extract_token_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer abc.def"));
        assert_eq!(extract_token(&headers), "abc.def");
    }

    #[test]
    fn test_extract_token_other_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(extract_token(&headers), "");

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer"));
        assert_eq!(extract_token(&headers), "");
    }

    #[test]
    fn test_extract_token_none() {
        assert_eq!(extract_token(&HeaderMap::new()), "");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }
}
