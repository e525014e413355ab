//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP gateway:
//! error handling, configuration, the per-call runtime configuration, the
//! backend HTTP client, server lifecycle management and transports.

pub mod config;
pub mod error;
pub mod http;
pub mod runtime;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use http::{BackendClient, HttpError};
pub use runtime::{RuntimeConfig, RuntimeEnv};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
