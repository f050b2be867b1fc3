//! Typed configuration for the NVMe-oF gateway documentation service.
//!
//! Configuration is layered: built-in defaults, then an optional TOML or
//! JSON file, then `PREFIX__SECTION__KEY` environment variables.
//!
//! # Example
//!
//! ```no_run
//! use nvmeof_config::ConfigLoader;
//!
//! # fn main() -> Result<(), nvmeof_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("nvmeof-docs.toml")?
//!     .with_env_prefix("NVMEOF")
//!     .load()?;
//!
//! println!("Docs mounted at: {}", config.docs.mount_path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [docs]
//! title = "ceph-nvmeof REST API"
//! description = "This is the official Ceph NVMeOF API"
//! version = "v1"
//! offline_host = "example.com"
//! static_prefix = "/static"
//! mount_path = "/docs"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! include_location = false
//! ```
//!
//! # Environment Variable Overrides
//!
//! - `NVMEOF__DOCS__TITLE=My Gateway`
//! - `NVMEOF__DOCS__MOUNT_PATH=/api/docs`
//! - `NVMEOF__LOGGING__LEVEL=debug`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::GatewayConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{DocsConfig, LogFormat, LoggingConfig};
