//! Greeting tool, handy for checking that a client is wired up.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::error::Result;
use crate::domains::tools::gateway::Gateway;
use crate::domains::tools::handlers::{GatewayTool, parse_params, tool_model};

/// Parameters for the greeting tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SayHelloParams {
    /// The name of the person to greet.
    pub name: String,
}

pub fn greeting(name: &str) -> String {
    format!("Hello from the DFT MCP gateway, {name}!")
}

pub struct SayHelloTool;

impl SayHelloTool {
    pub const NAME: &'static str = "say_hello";

    pub const DESCRIPTION: &'static str =
        "A friendly greeting. Does not touch the backend; useful to check connectivity.";
}

#[async_trait]
impl GatewayTool for SayHelloTool {
    fn name(&self) -> String {
        Self::NAME.to_string()
    }

    fn to_tool(&self) -> Tool {
        tool_model::<SayHelloParams>(Self::NAME.to_string(), Self::DESCRIPTION.to_string())
    }

    async fn call(&self, gateway: &Gateway, arguments: JsonObject) -> Result<CallToolResult> {
        let params: SayHelloParams = parse_params(Self::NAME, arguments)?;
        Ok(gateway.say_hello(&params.name))
    }
}
