//! Tool handlers.
//!
//! [`GatewayTool`] is the seam between the MCP tool table and the
//! [`Gateway`] façade: it describes a tool (name, description, input schema)
//! and turns raw JSON arguments into one typed façade call.

use async_trait::async_trait;
use rmcp::handler::server::tool::schema_for_type;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::ToolError;
use super::crud::{
    BackendResource, CreateParams, CrudOperation, IdParams, ListParams, UpdateParams,
};
use super::gateway::Gateway;
use crate::core::error::Result;

/// A tool exposed over MCP.
#[async_trait]
pub trait GatewayTool: Send + Sync {
    /// Name under which the tool is registered.
    fn name(&self) -> String;

    /// Tool metadata (description and JSON schema of the arguments).
    fn to_tool(&self) -> Tool;

    /// Parse `arguments` and run the tool.
    ///
    /// Backend failures are already folded into the returned envelope; an
    /// `Err` means bad arguments or a configuration defect.
    async fn call(&self, gateway: &Gateway, arguments: JsonObject) -> Result<CallToolResult>;
}

/// Deserialize tool arguments, reporting failures as invalid arguments.
pub fn parse_params<P: DeserializeOwned>(tool: &str, arguments: JsonObject) -> Result<P> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(tool, e.to_string()).into())
}

/// Build the rmcp `Tool` model for a tool taking parameters `P`.
pub fn tool_model<P: JsonSchema + 'static>(name: String, description: String) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: schema_for_type::<P>().into(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

// ============================================================================
// CRUD tool
// ============================================================================

/// One CRUD operation on one backend resource, e.g. `get_doctor_by_id`.
#[derive(Debug, Clone, Copy)]
pub struct CrudTool {
    pub resource: &'static BackendResource,
    pub op: CrudOperation,
}

impl CrudTool {
    pub fn new(resource: &'static BackendResource, op: CrudOperation) -> Self {
        Self { resource, op }
    }

    /// All five tools of a resource.
    pub fn for_resource(resource: &'static BackendResource) -> impl Iterator<Item = Self> {
        CrudOperation::ALL
            .into_iter()
            .map(move |op| Self::new(resource, op))
    }
}

#[async_trait]
impl GatewayTool for CrudTool {
    fn name(&self) -> String {
        self.resource.tool_name(self.op)
    }

    fn to_tool(&self) -> Tool {
        let name = self.name();
        let description = self.resource.tool_description(self.op);
        match self.op {
            CrudOperation::List => tool_model::<ListParams>(name, description),
            CrudOperation::Get | CrudOperation::Delete => tool_model::<IdParams>(name, description),
            CrudOperation::Create => tool_model::<CreateParams>(name, description),
            CrudOperation::Update => tool_model::<UpdateParams>(name, description),
        }
    }

    async fn call(&self, gateway: &Gateway, arguments: JsonObject) -> Result<CallToolResult> {
        debug!("Dispatching {:?} on {}", self.op, self.resource.collection);
        let name = self.name();
        if self.op.is_mutation() && gateway.runtime().admin_api_token().is_empty() {
            warn!("{} called without ADMIN_API_TOKEN, the backend will likely refuse it", name);
        }
        match self.op {
            CrudOperation::List => gateway.list(self.resource).await,
            CrudOperation::Get => {
                let params: IdParams = parse_params(&name, arguments)?;
                gateway.get(self.resource, &params.id).await
            }
            CrudOperation::Create => {
                let params: CreateParams = parse_params(&name, arguments)?;
                gateway.create(self.resource, &params.input).await
            }
            CrudOperation::Update => {
                let params: UpdateParams = parse_params(&name, arguments)?;
                gateway.update(self.resource, &params.id, &params.input).await
            }
            CrudOperation::Delete => {
                let params: IdParams = parse_params(&name, arguments)?;
                gateway.delete(self.resource, &params.id).await
            }
        }
    }
}
