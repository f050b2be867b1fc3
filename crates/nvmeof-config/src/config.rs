//! Root configuration type.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, DocsConfig, LoggingConfig};

/// Complete gateway documentation configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use nvmeof_config::GatewayConfig;
///
/// let config = GatewayConfig::default();
/// assert_eq!(config.docs.mount_path, "/docs");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Documentation settings.
    #[serde(default)]
    pub docs: DocsConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `docs.title` or `docs.version` is empty
    /// - `docs.mount_path` or `docs.static_prefix` does not start with `/`
    /// - `logging.level` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.docs.title.trim().is_empty() {
            return Err(ConfigError::invalid_value("docs.title", "must not be empty"));
        }

        if self.docs.version.trim().is_empty() {
            return Err(ConfigError::invalid_value("docs.version", "must not be empty"));
        }

        if !self.docs.mount_path.starts_with('/') {
            return Err(ConfigError::invalid_value(
                "docs.mount_path",
                format!("must start with '/': {}", self.docs.mount_path),
            ));
        }

        if !self.docs.static_prefix.starts_with('/') {
            return Err(ConfigError::invalid_value(
                "docs.static_prefix",
                format!("must start with '/': {}", self.docs.static_prefix),
            ));
        }

        if self.logging.enabled && self.logging.level.trim().is_empty() {
            return Err(ConfigError::validation_error(
                "logging.level must be set when logging is enabled",
            ));
        }

        Ok(())
    }

    /// Development preset: pretty, debug-level logs with source locations.
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = crate::LogFormat::Pretty;
        config.logging.include_location = true;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_development_preset() {
        let config = GatewayConfig::development();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, crate::LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_title() {
        let mut config = GatewayConfig::default();
        config.docs.title = "  ".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs.title"));
    }

    #[test]
    fn test_validate_relative_mount_path() {
        let mut config = GatewayConfig::default();
        config.docs.mount_path = "docs".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "docs.mount_path"));
    }

    #[test]
    fn test_validate_relative_static_prefix() {
        let mut config = GatewayConfig::default();
        config.docs.static_prefix = "static".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_level_only_when_enabled() {
        let mut config = GatewayConfig::default();
        config.logging.level = String::new();
        assert!(config.validate().is_err());

        config.logging.enabled = false;
        assert!(config.validate().is_ok());
    }
}
