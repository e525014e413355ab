//! Gateway façade.
//!
//! [`Gateway`] is the table of operations exposed to MCP clients. Each
//! method is a thin, typed pass-through to a domain operation. Runtime
//! configuration is re-applied at the start of every call, so nothing
//! request-scoped survives from one call to the next.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use super::crud::{self, BackendResource, ResourceId};
use super::definitions::{consultations, dopamart, greeting, mindfulness, subscriptions, users};
use crate::core::config::BackendConfig;
use crate::core::error::{Error, Result};
use crate::core::http::BackendClient;
use crate::core::runtime::{RuntimeConfig, RuntimeEnv};

/// Entry point for every tool call.
#[derive(Debug, Clone)]
pub struct Gateway {
    http: reqwest::Client,
    runtime: RuntimeConfig,
    refresh_from_env: bool,
}

impl Gateway {
    /// Create a gateway from the backend section of the configuration.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(http, config))
    }

    /// Create a gateway around an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            http,
            runtime: RuntimeConfig::from(config),
            refresh_from_env: config.refresh_from_env,
        }
    }

    /// The runtime configuration a call starting now would use.
    pub fn runtime(&self) -> RuntimeConfig {
        let mut runtime = self.runtime.clone();
        if self.refresh_from_env {
            runtime.configure(&RuntimeEnv::from_env());
        }
        runtime
    }

    /// A backend client for one call.
    pub fn backend(&self) -> BackendClient {
        BackendClient::new(self.http.clone(), self.runtime())
    }

    // ========================================================================
    // Generic operations
    // ========================================================================

    pub async fn list(&self, resource: &BackendResource) -> Result<CallToolResult> {
        crud::list(&self.backend(), resource).await
    }

    pub async fn get(&self, resource: &BackendResource, id: &ResourceId) -> Result<CallToolResult> {
        crud::get(&self.backend(), resource, id).await
    }

    pub async fn create(&self, resource: &BackendResource, input: &Value) -> Result<CallToolResult> {
        crud::create(&self.backend(), resource, input).await
    }

    pub async fn update(
        &self,
        resource: &BackendResource,
        id: &ResourceId,
        input: &Value,
    ) -> Result<CallToolResult> {
        crud::update(&self.backend(), resource, id, input).await
    }

    pub async fn delete(&self, resource: &BackendResource, id: &ResourceId) -> Result<CallToolResult> {
        crud::delete(&self.backend(), resource, id).await
    }

    // ========================================================================
    // Operations without a backend endpoint
    // ========================================================================

    /// Subscriptions of a user (not implemented by the backend yet).
    pub fn get_user_subscriptions(&self, user_id: impl Into<ResourceId>) -> CallToolResult {
        subscriptions::get_user_subscriptions(&user_id.into()).into()
    }

    /// Profile of a user (not implemented by the backend yet).
    pub fn get_profile(&self, user_id: impl Into<ResourceId>) -> CallToolResult {
        users::get_profile(&user_id.into()).into()
    }

    /// Update a user profile (not implemented by the backend yet).
    pub fn update_profile(
        &self,
        user_id: impl Into<ResourceId>,
        input: Option<Value>,
    ) -> CallToolResult {
        users::update_profile(&user_id.into(), input).into()
    }

    /// Plain-text greeting.
    pub fn say_hello(&self, name: &str) -> CallToolResult {
        CallToolResult::success(vec![Content::text(greeting::greeting(name))])
    }
}

/// Stamp out the five typed methods of a resource.
macro_rules! crud_methods {
    ($(
        $resource:path => {
            list: $list:ident,
            get: $get:ident,
            create: $create:ident,
            update: $update:ident,
            delete: $delete:ident $(,)?
        }
    )*) => {
        impl Gateway {
            $(
                #[doc = concat!("List the `", stringify!($resource), "` collection.")]
                pub async fn $list(&self) -> Result<CallToolResult> {
                    self.list(&$resource).await
                }

                #[doc = concat!("Fetch one item of `", stringify!($resource), "`.")]
                pub async fn $get(&self, id: impl Into<ResourceId>) -> Result<CallToolResult> {
                    self.get(&$resource, &id.into()).await
                }

                #[doc = concat!("Create an item in `", stringify!($resource), "`.")]
                pub async fn $create(&self, input: Value) -> Result<CallToolResult> {
                    self.create(&$resource, &input).await
                }

                #[doc = concat!("Partially update an item of `", stringify!($resource), "`.")]
                pub async fn $update(
                    &self,
                    id: impl Into<ResourceId>,
                    input: Value,
                ) -> Result<CallToolResult> {
                    self.update(&$resource, &id.into(), &input).await
                }

                #[doc = concat!("Delete an item of `", stringify!($resource), "`.")]
                pub async fn $delete(&self, id: impl Into<ResourceId>) -> Result<CallToolResult> {
                    self.delete(&$resource, &id.into()).await
                }
            )*
        }
    };
}

crud_methods! {
    consultations::DOCTORS => {
        list: get_doctors,
        get: get_doctor_by_id,
        create: create_doctor,
        update: update_doctor,
        delete: delete_doctor,
    }
    consultations::SPECIALIZATIONS => {
        list: get_specializations,
        get: get_specialization_by_id,
        create: create_specialization,
        update: update_specialization,
        delete: delete_specialization,
    }
    mindfulness::CATEGORIES => {
        list: list_categories,
        get: get_category_by_id,
        create: create_category,
        update: update_category,
        delete: delete_category,
    }
    mindfulness::TRACKS => {
        list: list_tracks,
        get: get_track_by_id,
        create: create_track,
        update: update_track,
        delete: delete_track,
    }
    dopamart::PRODUCTS => {
        list: list_products,
        get: get_product_by_id,
        create: create_product,
        update: update_product,
        delete: delete_product,
    }
    subscriptions::PLANS => {
        list: list_plans,
        get: get_plan_by_id,
        create: create_plan,
        update: update_plan,
        delete: delete_plan,
    }
}
