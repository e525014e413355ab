//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Used by the STDIO/TCP transports. Every registered tool gets one dynamic
//! route that forwards the call arguments to [`GatewayTool::call`].

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};

use super::gateway::Gateway;
use super::handlers::GatewayTool;
use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: &ToolRegistry) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .tools()
        .iter()
        .fold(ToolRouter::new(), |router, tool| {
            router.with_route(create_route(tool.clone(), registry.gateway().clone()))
        })
}

/// Create a ToolRoute for one tool.
pub fn create_route<S>(tool: Arc<dyn GatewayTool>, gateway: Arc<Gateway>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(tool.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let tool = tool.clone();
        let gateway = gateway.clone();
        async move { tool.call(&gateway, args).await.map_err(McpError::from) }.boxed()
    })
}
