//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The list of every exposed tool (single source of truth)
//! - Name-based dispatch, used by the HTTP transport
//! - Tool metadata for listing

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{info, warn};

use super::ToolError;
use super::definitions::{
    GetProfileTool, SayHelloTool, UpdateProfileTool, UserSubscriptionsTool, all_resources,
};
use super::gateway::Gateway;
use super::handlers::{CrudTool, GatewayTool};
use crate::core::error::Result;

/// Tool registry - owns every tool and the gateway they call into.
#[derive(Clone)]
pub struct ToolRegistry {
    gateway: Arc<Gateway>,
    tools: Vec<Arc<dyn GatewayTool>>,
}

impl ToolRegistry {
    /// Create a registry with every available tool.
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            gateway,
            tools: Self::all_tools(),
        }
    }

    /// Every tool, CRUD tools first in resource order.
    pub fn all_tools() -> Vec<Arc<dyn GatewayTool>> {
        let mut tools: Vec<Arc<dyn GatewayTool>> = all_resources()
            .into_iter()
            .flat_map(CrudTool::for_resource)
            .map(|tool| Arc::new(tool) as Arc<dyn GatewayTool>)
            .collect();

        tools.push(Arc::new(UserSubscriptionsTool));
        tools.push(Arc::new(GetProfileTool));
        tools.push(Arc::new(UpdateProfileTool));
        tools.push(Arc::new(SayHelloTool));
        tools
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    pub fn tools(&self) -> &[Arc<dyn GatewayTool>] {
        &self.tools
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.to_tool()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&Arc<dyn GatewayTool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Dispatch a tool call by name.
    pub async fn call_tool(&self, name: &str, arguments: JsonObject) -> Result<CallToolResult> {
        let Some(tool) = self.find(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name).into());
        };
        info!("Calling tool: {}", name);
        tool.call(&self.gateway, arguments).await
    }
}
