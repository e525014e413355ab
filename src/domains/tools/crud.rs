//! Generic CRUD over backend resources.
//!
//! Every backend resource follows the same routing convention:
//!
//! | operation | verb   | path                               |
//! |-----------|--------|------------------------------------|
//! | list      | GET    | `/api/v1/<domain>/<collection>/`      |
//! | get       | GET    | `/api/v1/<domain>/<collection>/<id>/` |
//! | create    | POST   | `/api/v1/<domain>/<collection>/`      |
//! | update    | PATCH  | `/api/v1/<domain>/<collection>/<id>/` |
//! | delete    | DELETE | `/api/v1/<domain>/<collection>/<id>/` |
//!
//! [`guarded`] is the one place where a backend call is turned into an
//! envelope. URL construction happens before it, so a missing `SERVER_URL`
//! escapes as [`Error::Config`] instead of being reported as a tool error.

use std::fmt;
use std::future::Future;

use reqwest::Url;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::envelope::ToolOutcome;
use crate::core::error::Result;
use crate::core::http::{BackendClient, HttpError};

/// API prefix shared by every backend resource.
const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Static description of one backend resource family.
#[derive(Debug, PartialEq, Eq)]
pub struct BackendResource {
    /// Domain segment, e.g. `consultations`.
    pub domain: &'static str,
    /// Collection segment, also used as the plural noun, e.g. `doctors`.
    pub collection: &'static str,
    /// Singular noun used in tool names and messages, e.g. `doctor`.
    pub singular: &'static str,
    /// Name of the list tool (`get_doctors`, `list_products`, ...).
    pub list_tool: &'static str,
    /// Short human description used in tool descriptions.
    pub summary: &'static str,
}

impl BackendResource {
    /// Path of the collection relative to the server URL, with slashes.
    pub fn collection_path(&self) -> String {
        format!(
            "/{}/{}/{}/{}/",
            API_PREFIX[0], API_PREFIX[1], self.domain, self.collection
        )
    }

    /// Tool name for `op` on this resource.
    pub fn tool_name(&self, op: CrudOperation) -> String {
        match op {
            CrudOperation::List => self.list_tool.to_string(),
            CrudOperation::Get => format!("get_{}_by_id", self.singular),
            CrudOperation::Create => format!("create_{}", self.singular),
            CrudOperation::Update => format!("update_{}", self.singular),
            CrudOperation::Delete => format!("delete_{}", self.singular),
        }
    }

    /// Tool description for `op` on this resource.
    pub fn tool_description(&self, op: CrudOperation) -> String {
        let path = self.collection_path();
        match op {
            CrudOperation::List => format!(
                "List all {} ({}). Performs GET {} on the backend and returns the JSON response.",
                self.collection, self.summary, path
            ),
            CrudOperation::Get => format!(
                "Fetch a single {} by id. Performs GET {}{{id}}/ on the backend.",
                self.singular, path
            ),
            CrudOperation::Create => format!(
                "Create a {} from the JSON object in `input`. Performs POST {} with the admin token.",
                self.singular, path
            ),
            CrudOperation::Update => format!(
                "Partially update the {} with the given id using the fields in `input`. Performs PATCH {}{{id}}/ with the admin token.",
                self.singular, path
            ),
            CrudOperation::Delete => format!(
                "Delete the {} with the given id. Performs DELETE {}{{id}}/ with the admin token.",
                self.singular, path
            ),
        }
    }

    fn collection_url(&self, backend: &BackendClient) -> Result<Url> {
        backend.url(&[API_PREFIX[0], API_PREFIX[1], self.domain, self.collection])
    }

    fn item_url(&self, backend: &BackendClient, id: &ResourceId) -> Result<Url> {
        let id = id.to_string();
        backend.url(&[
            API_PREFIX[0],
            API_PREFIX[1],
            self.domain,
            self.collection,
            id.as_str(),
        ])
    }
}

/// The five operations every resource supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrudOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl CrudOperation {
    pub const ALL: [CrudOperation; 5] = [
        Self::List,
        Self::Get,
        Self::Create,
        Self::Update,
        Self::Delete,
    ];

    /// Whether the operation changes backend state.
    pub fn is_mutation(self) -> bool {
        matches!(self, Self::Create | Self::Update | Self::Delete)
    }
}

/// Identifier of a backend record: an integer for most resources, a UUID
/// string for others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Str(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        Self::Int(id.into())
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for list operations (none).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListParams {}

/// Parameters for get and delete operations.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IdParams {
    /// Record id: an integer or a UUID string depending on the resource.
    pub id: ResourceId,
}

/// Parameters for create operations.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CreateParams {
    /// JSON object sent as the request body. Defaults to `{}`.
    #[serde(default)]
    pub input: Value,
}

/// Parameters for update operations.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateParams {
    /// Record id: an integer or a UUID string depending on the resource.
    pub id: ResourceId,

    /// Fields to change, sent as the PATCH body. Defaults to `{}`.
    #[serde(default)]
    pub input: Value,
}

// ============================================================================
// Operations
// ============================================================================

/// Await a backend call and map it onto a [`ToolOutcome`].
///
/// Failures are reported as `"<description>: <error>"`.
pub async fn guarded<F>(description: String, call: F) -> ToolOutcome
where
    F: Future<Output = std::result::Result<Value, HttpError>>,
{
    match call.await {
        Ok(value) => ToolOutcome::Success(value),
        Err(e) => {
            warn!("{} failed: {}", description, e);
            ToolOutcome::Failure(format!("{description}: {e}"))
        }
    }
}

/// GET the collection.
#[instrument(skip_all, fields(resource = resource.collection))]
pub async fn list(backend: &BackendClient, resource: &BackendResource) -> Result<CallToolResult> {
    let url = resource.collection_url(backend)?;
    info!("Listing {}", resource.collection);
    let description = format!("Failed to fetch {}", resource.collection);
    Ok(guarded(description, backend.fetch_json(url)).await.into())
}

/// GET a single item.
#[instrument(skip_all, fields(resource = resource.collection, id = %id))]
pub async fn get(
    backend: &BackendClient,
    resource: &BackendResource,
    id: &ResourceId,
) -> Result<CallToolResult> {
    let url = resource.item_url(backend, id)?;
    info!("Fetching {} {}", resource.singular, id);
    let description = format!("Failed to fetch {} {}", resource.singular, id);
    Ok(guarded(description, backend.fetch_json(url)).await.into())
}

/// POST a new item to the collection.
#[instrument(skip_all, fields(resource = resource.collection))]
pub async fn create(
    backend: &BackendClient,
    resource: &BackendResource,
    input: &Value,
) -> Result<CallToolResult> {
    let url = resource.collection_url(backend)?;
    info!("Creating {}", resource.singular);
    let description = format!("Failed to create {}", resource.singular);
    Ok(guarded(description, backend.post_json(url, Some(input)))
        .await
        .into())
}

/// PATCH an item.
#[instrument(skip_all, fields(resource = resource.collection, id = %id))]
pub async fn update(
    backend: &BackendClient,
    resource: &BackendResource,
    id: &ResourceId,
    input: &Value,
) -> Result<CallToolResult> {
    let url = resource.item_url(backend, id)?;
    info!("Updating {} {}", resource.singular, id);
    let description = format!("Failed to update {} {}", resource.singular, id);
    Ok(guarded(description, backend.patch_json(url, Some(input)))
        .await
        .into())
}

/// DELETE an item. An empty acknowledgement becomes `{"success": true}`.
#[instrument(skip_all, fields(resource = resource.collection, id = %id))]
pub async fn delete(
    backend: &BackendClient,
    resource: &BackendResource,
    id: &ResourceId,
) -> Result<CallToolResult> {
    let url = resource.item_url(backend, id)?;
    info!("Deleting {} {}", resource.singular, id);
    let description = format!("Failed to delete {} {}", resource.singular, id);
    let outcome = match guarded(description, backend.delete_request(url)).await {
        ToolOutcome::Success(value) if is_empty_ack(&value) => {
            ToolOutcome::Success(json!({ "success": true }))
        }
        other => other,
    };
    Ok(outcome.into())
}

/// Bodies that acknowledge a delete without saying anything: null, `""`,
/// `false` and `0`. Whitespace is kept as the backend sent it.
fn is_empty_ack(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::core::runtime::RuntimeConfig;
    use rmcp::model::RawContent;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WIDGETS: BackendResource = BackendResource {
        domain: "shop",
        collection: "widgets",
        singular: "widget",
        list_tool: "list_widgets",
        summary: "test widgets",
    };

    fn backend(server_url: &str) -> BackendClient {
        BackendClient::new(
            reqwest::Client::new(),
            RuntimeConfig::new(server_url, Some("token".to_string())),
        )
    }

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_tool_names() {
        assert_eq!(WIDGETS.tool_name(CrudOperation::List), "list_widgets");
        assert_eq!(WIDGETS.tool_name(CrudOperation::Get), "get_widget_by_id");
        assert_eq!(WIDGETS.tool_name(CrudOperation::Create), "create_widget");
        assert_eq!(WIDGETS.tool_name(CrudOperation::Update), "update_widget");
        assert_eq!(WIDGETS.tool_name(CrudOperation::Delete), "delete_widget");
    }

    #[test]
    fn test_collection_path() {
        assert_eq!(WIDGETS.collection_path(), "/api/v1/shop/widgets/");
        assert!(
            WIDGETS
                .tool_description(CrudOperation::Get)
                .contains("GET /api/v1/shop/widgets/{id}/")
        );
    }

    #[test]
    fn test_resource_id_untagged() {
        let id: ResourceId = serde_json::from_value(json!(12)).unwrap();
        assert_eq!(id, ResourceId::Int(12));
        let id: ResourceId =
            serde_json::from_value(json!("5b11f4ce-a62d-471e-81fc-a69a8278c7da")).unwrap();
        assert_eq!(id.to_string(), "5b11f4ce-a62d-471e-81fc-a69a8278c7da");
    }

    #[test]
    fn test_create_params_default_input() {
        let params: CreateParams = serde_json::from_value(json!({})).unwrap();
        assert!(params.input.is_null());
    }

    #[tokio::test]
    async fn test_list_success_passes_body_through() {
        let server = MockServer::start().await;
        let body = json!([{"id": 1, "price": "10.00"}]);
        Mock::given(method("GET"))
            .and(path("/api/v1/shop/widgets/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let result = list(&backend(&server.uri()), &WIDGETS).await.unwrap();
        let parsed: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(parsed, body);
    }

    #[tokio::test]
    async fn test_get_failure_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/shop/widgets/9/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = get(&backend(&server.uri()), &WIDGETS, &ResourceId::Int(9))
            .await
            .unwrap();
        assert!(result.is_error.unwrap_or(false));
        let parsed: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(
            parsed["error"],
            "Failed to fetch widget 9: 500 Internal Server Error: boom"
        );
    }

    #[tokio::test]
    async fn test_update_sends_patch_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/v1/shop/widgets/abc/"))
            .and(header("x-admin-api-token", "token"))
            .and(body_json(json!({"name": "Y"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc", "name": "Y"})))
            .expect(1)
            .mount(&server)
            .await;

        let result = update(
            &backend(&server.uri()),
            &WIDGETS,
            &ResourceId::from("abc"),
            &json!({"name": "Y"}),
        )
        .await
        .unwrap();
        let parsed: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(parsed["name"], "Y");
    }

    #[tokio::test]
    async fn test_delete_empty_body_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/shop/widgets/3/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let result = delete(&backend(&server.uri()), &WIDGETS, &ResourceId::Int(3))
            .await
            .unwrap();
        assert!(!result.is_error.unwrap_or(false));
        let parsed: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(parsed, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_delete_keeps_non_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200).set_body_string("gone"))
            .mount(&server)
            .await;

        let result = delete(&backend(&server.uri()), &WIDGETS, &ResourceId::Int(3))
            .await
            .unwrap();
        assert_eq!(text_of(&result), "gone");
    }

    #[tokio::test]
    async fn test_delete_keeps_whitespace_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200).set_body_string("  "))
            .mount(&server)
            .await;

        let result = delete(&backend(&server.uri()), &WIDGETS, &ResourceId::Int(3))
            .await
            .unwrap();
        assert_eq!(text_of(&result), "  ");
    }

    #[tokio::test]
    async fn test_delete_falsy_json_is_success() {
        for body in [json!(false), json!(0)] {
            let server = MockServer::start().await;
            Mock::given(method("DELETE"))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&server)
                .await;

            let result = delete(&backend(&server.uri()), &WIDGETS, &ResourceId::Int(3))
                .await
                .unwrap();
            let parsed: Value = serde_json::from_str(&text_of(&result)).unwrap();
            assert_eq!(parsed, json!({"success": true}));
        }
    }

    #[test]
    fn test_empty_ack_rules() {
        assert!(is_empty_ack(&Value::Null));
        assert!(is_empty_ack(&json!("")));
        assert!(is_empty_ack(&json!(false)));
        assert!(is_empty_ack(&json!(0)));
        assert!(!is_empty_ack(&json!(" ")));
        assert!(!is_empty_ack(&json!(true)));
        assert!(!is_empty_ack(&json!(1)));
        assert!(!is_empty_ack(&json!({})));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_tool_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let result = list(&backend("http://127.0.0.1:9"), &WIDGETS).await.unwrap();
        assert!(result.is_error.unwrap_or(false));
        assert!(text_of(&result).starts_with(r#"{"error":"Failed to fetch widgets: "#));
    }

    #[tokio::test]
    async fn test_missing_server_url_is_config_error() {
        let unconfigured = BackendClient::new(reqwest::Client::new(), RuntimeConfig::default());
        let err = create(&unconfigured, &WIDGETS, &json!({})).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
