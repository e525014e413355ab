//! DFT MCP Gateway Library
//!
//! This crate exposes the DFT backend REST API as Model Context Protocol
//! (MCP) tools. Each tool performs a single HTTP request against the
//! configured backend and answers with a text envelope.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, runtime configuration, backend HTTP
//!   client, the MCP server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: backend resources, the CRUD tools and the gateway façade
//!
//! # Example
//!
//! ```rust,no_run
//! use dft_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     let doctors = server.gateway().get_doctors().await?;
//!     println!("{:?}", doctors.content);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::tools::Gateway;
