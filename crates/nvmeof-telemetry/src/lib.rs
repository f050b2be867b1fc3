//! Logging setup for the NVMe-oF gateway documentation service.
//!
//! The documentation core only emits `tracing` events; this crate decides
//! where they go. Output is structured JSON by default and human-readable
//! in development.
//!
//! # Example
//!
//! ```rust,ignore
//! use nvmeof_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::debug!(host = "localhost:5000", "Generating OpenAPI document");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
