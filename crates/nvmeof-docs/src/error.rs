//! Error types for the documentation crate.
//!
//! Missing or misspelled documentation metadata never produces an error; it
//! only makes the generated document less detailed. The variants here cover
//! structurally invalid registry input and the HTTP boundary.

use thiserror::Error;

/// Errors that can occur during documentation generation.
#[derive(Debug, Error)]
pub enum DocsError {
    /// A registered endpoint violates the descriptor shape contract.
    #[error("Invalid endpoint descriptor {method} {path}: {reason}")]
    InvalidDescriptor {
        /// Registered path of the endpoint.
        path: String,
        /// HTTP method of the endpoint.
        method: String,
        /// What is wrong with the descriptor.
        reason: String,
    },

    /// HTTP method that cannot carry a documented endpoint.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Failed to serialize the OpenAPI document to JSON.
    #[error("Failed to serialize OpenAPI spec: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Failed to build an HTTP response.
    #[error("Failed to build HTTP response: {0}")]
    Http(#[from] http::Error),
}

impl DocsError {
    /// Create a new invalid descriptor error.
    pub fn invalid_descriptor(
        path: impl Into<String>,
        method: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDescriptor {
            path: path.into(),
            method: method.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;
