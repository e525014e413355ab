//! Domains module containing business logic organized by bounded contexts.
//!
//! The gateway only exposes tools: every backend operation is an MCP tool.

pub mod tools;
