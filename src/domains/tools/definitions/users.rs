//! User profiles.
//!
//! Neither operation has a backend endpoint yet; both answer with an
//! explicit not-implemented marker instead of a fabricated result.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::core::error::Result;
use crate::domains::tools::crud::ResourceId;
use crate::domains::tools::envelope::ToolOutcome;
use crate::domains::tools::gateway::Gateway;
use crate::domains::tools::handlers::{GatewayTool, parse_params, tool_model};

pub fn get_profile(user_id: &ResourceId) -> ToolOutcome {
    info!("get_profile({}) requested", user_id);
    ToolOutcome::NotImplemented {
        operation: format!("{}({user_id})", GetProfileTool::NAME),
        input: None,
    }
}

/// The submitted input, when there is one, is echoed back so callers can
/// see nothing was stored.
pub fn update_profile(user_id: &ResourceId, input: Option<Value>) -> ToolOutcome {
    info!("update_profile({}) requested", user_id);
    ToolOutcome::NotImplemented {
        operation: format!("{}({user_id})", UpdateProfileTool::NAME),
        input,
    }
}

/// Parameters for `get_profile`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProfileParams {
    /// User id (integer or UUID string).
    pub user_id: ResourceId,
}

/// Parameters for `update_profile`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateProfileParams {
    /// User id (integer or UUID string).
    pub user_id: ResourceId,

    /// Profile fields to change.
    #[serde(default)]
    pub input: Option<Value>,
}

pub struct GetProfileTool;

impl GetProfileTool {
    pub const NAME: &'static str = "get_profile";

    pub const DESCRIPTION: &'static str =
        "Fetch a user profile. Not yet backed by an endpoint: always answers with a not_implemented status.";
}

#[async_trait]
impl GatewayTool for GetProfileTool {
    fn name(&self) -> String {
        Self::NAME.to_string()
    }

    fn to_tool(&self) -> Tool {
        tool_model::<GetProfileParams>(Self::NAME.to_string(), Self::DESCRIPTION.to_string())
    }

    async fn call(&self, gateway: &Gateway, arguments: JsonObject) -> Result<CallToolResult> {
        let params: GetProfileParams = parse_params(Self::NAME, arguments)?;
        Ok(gateway.get_profile(params.user_id))
    }
}

pub struct UpdateProfileTool;

impl UpdateProfileTool {
    pub const NAME: &'static str = "update_profile";

    pub const DESCRIPTION: &'static str =
        "Update a user profile. Not yet backed by an endpoint: always answers with a not_implemented status and echoes the input.";
}

#[async_trait]
impl GatewayTool for UpdateProfileTool {
    fn name(&self) -> String {
        Self::NAME.to_string()
    }

    fn to_tool(&self) -> Tool {
        tool_model::<UpdateProfileParams>(Self::NAME.to_string(), Self::DESCRIPTION.to_string())
    }

    async fn call(&self, gateway: &Gateway, arguments: JsonObject) -> Result<CallToolResult> {
        let params: UpdateProfileParams = parse_params(Self::NAME, arguments)?;
        Ok(gateway.update_profile(params.user_id, params.input))
    }
}
