//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the tool registry.
//!
//! ## Tool Architecture
//!
//! Tools are registered in `domains/tools/registry.rs`. Each one implements
//! `GatewayTool` and calls into the `Gateway` façade.
//!
//! The ToolRouter is built from the registry in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;

use super::config::Config;
use super::error::Result as GatewayResult;
use crate::domains::tools::{Gateway, ToolRegistry, build_tool_router};

/// Instructions reported to MCP clients on initialization.
pub const INSTRUCTIONS: &str = "Gateway to the DFT backend. Tools list, fetch, create, update and delete \
doctors, specializations, mindfulness categories and tracks, dopamart products and subscription plans. \
Every result is a single text item: the backend JSON on success, or {\"error\": ...} on failure.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes
/// tool calls through the registry to the gateway.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry of every exposed tool.
    registry: ToolRegistry,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> GatewayResult<Self> {
        let config = Arc::new(config);
        let gateway = Arc::new(Gateway::new(&config.backend)?);
        let registry = ToolRegistry::new(gateway);

        Ok(Self {
            tool_router: build_tool_router::<Self>(&registry),
            config,
            registry,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The façade every tool calls into.
    pub fn gateway(&self) -> &Arc<Gateway> {
        self.registry.gateway()
    }

    pub fn tool_count(&self) -> usize {
        self.registry.tools().len()
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Returns the serialized `CallToolResult`.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> GatewayResult<serde_json::Value> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            other => {
                return Err(crate::domains::tools::ToolError::invalid_arguments(
                    name,
                    format!("arguments must be an object, got {other}"),
                )
                .into());
            }
        };
        let result = self.registry.call_tool(name, arguments).await?;
        Ok(serde_json::to_value(&result)?)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BackendConfig;
    use crate::core::error::Error;
    use serde_json::json;

    fn test_server() -> McpServer {
        let config = Config {
            backend: BackendConfig {
                server_url: None,
                admin_api_token: None,
                refresh_from_env: false,
            },
            ..Config::default()
        };
        McpServer::new(config).unwrap()
    }

    #[test]
    fn test_list_tools_json() {
        let server = test_server();
        let tools = server.list_tools();
        assert_eq!(tools.len(), server.tool_count());
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[test]
    fn test_server_is_an_rmcp_handler() {
        fn assert_handler<H: ServerHandler>(_: &H) {}
        let server = test_server();
        assert_handler(&server);
        assert_eq!(server.tool_count(), 34);
    }

    #[test]
    fn test_server_info_enables_tools() {
        let info = test_server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("doctors"));
    }

    #[tokio::test]
    async fn test_call_tool_serializes_envelope() {
        let value = test_server()
            .call_tool("say_hello", json!({"name": "Lin"}))
            .await
            .unwrap();
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(
            value["content"][0]["text"],
            "Hello from the DFT MCP gateway, Lin!"
        );
    }

    #[tokio::test]
    async fn test_call_tool_without_backend_is_config_error() {
        let err = test_server()
            .call_tool("list_products", serde_json::Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_call_tool_rejects_non_object_arguments() {
        let err = test_server()
            .call_tool("say_hello", json!([1, 2]))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
    }
}
