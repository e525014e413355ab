//! Configuration management for the MCP gateway.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use super::runtime::{ADMIN_API_TOKEN_VAR, SERVER_URL_VAR};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Backend REST service location and credentials.
    pub backend: BackendConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration of the backend REST service.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. `https://backend.example.com`.
    pub server_url: Option<String>,

    /// Token forwarded as `X-Admin-Api-Token` on mutating calls.
    pub admin_api_token: Option<String>,

    /// Re-read `SERVER_URL` / `ADMIN_API_TOKEN` from the environment at the
    /// start of every tool call.
    pub refresh_from_env: bool,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("server_url", &self.server_url)
            .field(
                "admin_api_token",
                &self.admin_api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("refresh_from_env", &self.refresh_from_env)
            .finish()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            admin_api_token: None,
            refresh_from_env: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "dft-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings are prefixed with `MCP_` (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, ...). The backend uses the host-provided names
    /// `SERVER_URL` and `ADMIN_API_TOKEN`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        match std::env::var(SERVER_URL_VAR) {
            Ok(url) if !url.is_empty() => {
                info!("Backend URL: {}", url);
                config.backend.server_url = Some(url);
            }
            _ => warn!(
                "{} not set - every backend tool call will fail until it is provided",
                SERVER_URL_VAR
            ),
        }

        if let Ok(token) = std::env::var(ADMIN_API_TOKEN_VAR) {
            if !token.is_empty() {
                config.backend.admin_api_token = Some(token);
                info!("Admin API token loaded from environment");
            }
        }

        if let Ok(refresh) = std::env::var("MCP_BACKEND_REFRESH_ENV") {
            config.backend.refresh_from_env = refresh.parse().unwrap_or(true);
        }

        config
    }
}

/// Serialises tests that touch `SERVER_URL` / `ADMIN_API_TOKEN`.
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
