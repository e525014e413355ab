//! Subscriptions: plans CRUD plus the per-user subscription lookup.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::core::error::Result;
use crate::domains::tools::crud::{BackendResource, ResourceId};
use crate::domains::tools::envelope::ToolOutcome;
use crate::domains::tools::gateway::Gateway;
use crate::domains::tools::handlers::{GatewayTool, parse_params, tool_model};

/// `/api/v1/subscriptions/plans/`
pub const PLANS: BackendResource = BackendResource {
    domain: "subscriptions",
    collection: "plans",
    singular: "plan",
    list_tool: "list_plans",
    summary: "subscription plans with pricing and billing period",
};

pub const RESOURCES: [&BackendResource; 1] = [&PLANS];

/// Subscriptions held by a user.
///
/// The backend has no endpoint for this yet, so the answer is an explicit
/// not-implemented marker.
pub fn get_user_subscriptions(user_id: &ResourceId) -> ToolOutcome {
    info!("get_user_subscriptions({}) requested", user_id);
    ToolOutcome::NotImplemented {
        operation: format!("{}({user_id})", UserSubscriptionsTool::NAME),
        input: None,
    }
}

/// Parameters for the user subscriptions lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UserSubscriptionsParams {
    /// User id (integer or UUID string).
    pub user_id: ResourceId,
}

/// `get_user_subscriptions` tool.
pub struct UserSubscriptionsTool;

impl UserSubscriptionsTool {
    pub const NAME: &'static str = "get_user_subscriptions";

    pub const DESCRIPTION: &'static str = "List the subscriptions of a user. Not yet backed by an endpoint: always answers with a not_implemented status.";
}

#[async_trait]
impl GatewayTool for UserSubscriptionsTool {
    fn name(&self) -> String {
        Self::NAME.to_string()
    }

    fn to_tool(&self) -> Tool {
        tool_model::<UserSubscriptionsParams>(Self::NAME.to_string(), Self::DESCRIPTION.to_string())
    }

    async fn call(&self, gateway: &Gateway, arguments: JsonObject) -> Result<CallToolResult> {
        let params: UserSubscriptionsParams = parse_params(Self::NAME, arguments)?;
        Ok(gateway.get_user_subscriptions(params.user_id))
    }
}
