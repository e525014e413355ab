//! Tools domain module.
//!
//! Every tool maps one MCP call onto at most one backend request and
//! answers with a text envelope.
//!
//! ## Architecture
//!
//! - `definitions/` - Backend resources and bespoke tools, one file per domain
//! - `crud.rs` - Generic list/get/create/update/delete over a resource
//! - `envelope.rs` - Success/error envelope formatting
//! - `gateway.rs` - Typed façade, one method per exposed operation
//! - `handlers.rs` - `GatewayTool` trait and the generic CRUD tool
//! - `registry.rs` - Central tool registry and name-based dispatch
//! - `router.rs` - rmcp ToolRouter builder for STDIO/TCP transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a Backend Resource
//!
//! 1. Declare a `BackendResource` constant in the matching `definitions/` file
//! 2. Add it to that file's `RESOURCES`
//! 3. Add typed façade methods to the `crud_methods!` block in `gateway.rs`
//!
//! The registry and router pick the new tools up automatically.

pub mod crud;
pub mod definitions;
pub mod envelope;
mod error;
pub mod gateway;
pub mod handlers;
mod registry;
pub mod router;

pub use crud::{BackendResource, CrudOperation, ResourceId};
pub use envelope::{ToolOutcome, as_tool_error, as_tool_text};
pub use error::ToolError;
pub use gateway::Gateway;
pub use handlers::{CrudTool, GatewayTool};
pub use registry::ToolRegistry;
pub use router::build_tool_router;
