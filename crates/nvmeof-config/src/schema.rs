//! Configuration section types.

use serde::{Deserialize, Serialize};

/// Documentation section.
///
/// Controls the fixed parts of the generated OpenAPI document and where the
/// documentation endpoints are mounted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    /// `info.title` of the generated document.
    #[serde(default = "default_title")]
    pub title: String,

    /// `info.description` of the generated document.
    #[serde(default = "default_description")]
    pub description: String,

    /// `info.version` of the generated document.
    #[serde(default = "default_version")]
    pub version: String,

    /// Host placed in offline (static) copies of the document.
    #[serde(default = "default_offline_host")]
    pub offline_host: String,

    /// URL prefix the Swagger UI bundle and stylesheet are served from.
    #[serde(default = "default_static_prefix")]
    pub static_prefix: String,

    /// Path the documentation endpoints are mounted under.
    #[serde(default = "default_mount_path")]
    pub mount_path: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            version: default_version(),
            offline_host: default_offline_host(),
            static_prefix: default_static_prefix(),
            mount_path: default_mount_path(),
        }
    }
}

fn default_title() -> String {
    "ceph-nvmeof REST API".to_string()
}

fn default_description() -> String {
    "This is the official Ceph NVMeOF API".to_string()
}

fn default_version() -> String {
    "v1".to_string()
}

fn default_offline_host() -> String {
    "example.com".to_string()
}

fn default_static_prefix() -> String {
    "/static".to_string()
}

fn default_mount_path() -> String {
    "/docs".to_string()
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl From<&LoggingConfig> for nvmeof_telemetry::LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.enabled,
            level: config.level.clone(),
            json_format: config.format == LogFormat::Json,
            file_line_info: config.include_location,
            include_target: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docs_config_default() {
        let config = DocsConfig::default();
        assert_eq!(config.title, "ceph-nvmeof REST API");
        assert_eq!(config.version, "v1");
        assert_eq!(config.offline_host, "example.com");
        assert_eq!(config.static_prefix, "/static");
        assert_eq!(config.mount_path, "/docs");
    }

    #[test]
    fn test_docs_config_deserialize_partial() {
        let toml = r#"
            title = "Gateway API"
            mount_path = "/api/docs"
        "#;
        let config: DocsConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.title, "Gateway API");
        assert_eq!(config.mount_path, "/api/docs");
        // Defaults applied
        assert_eq!(config.version, "v1");
    }

    #[test]
    fn test_docs_config_unknown_field_rejected() {
        let toml = r#"
            title = "Gateway API"
            theme = "dark"
        "#;
        let result: Result<DocsConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_format_deserialize() {
        let config: LoggingConfig = toml::from_str(r#"format = "pretty""#).unwrap();
        assert_eq!(config.format, LogFormat::Pretty);

        let result: Result<LoggingConfig, _> = toml::from_str(r#"format = "xml""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_logging_config_into_log_config() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            include_location: true,
            ..Default::default()
        };

        let log: nvmeof_telemetry::LogConfig = (&config).into();
        assert_eq!(log.level, "debug");
        assert!(!log.json_format);
        assert!(log.file_line_info);
    }
}
