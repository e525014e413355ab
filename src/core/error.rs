//! Error types and handling for the MCP gateway.
//!
//! This module defines a unified error type for everything that must escape
//! a tool call. Backend failures never show up here: they are recovered into
//! a tool-error envelope inside the tools domain. What remains are
//! configuration defects, bad tool arguments and internal failures.

use thiserror::Error;

/// A specialized Result type for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP gateway.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Configuration-related errors (e.g. `SERVER_URL` missing).
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller sent something the gateway cannot act on
    /// (unknown tool, malformed arguments) as opposed to a server-side defect.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Tool(_))
    }
}

impl From<Error> for rmcp::ErrorData {
    fn from(err: Error) -> Self {
        if err.is_client_error() {
            rmcp::ErrorData::invalid_params(err.to_string(), None)
        } else {
            rmcp::ErrorData::internal_error(err.to_string(), None)
        }
    }
}
