//! Runtime configuration for backend calls.
//!
//! `RuntimeConfig` carries the backend base URL and the admin token. It is a
//! plain value handed to every backend call instead of process-wide state, so
//! concurrent tool calls can never observe each other's configuration.

use super::config::BackendConfig;
use super::error::{Error, Result};

/// Environment variable holding the backend base URL.
pub const SERVER_URL_VAR: &str = "SERVER_URL";

/// Environment variable holding the admin API token.
pub const ADMIN_API_TOKEN_VAR: &str = "ADMIN_API_TOKEN";

/// Raw values injected by the host for one request cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeEnv {
    pub server_url: Option<String>,
    pub admin_api_token: Option<String>,
}

impl RuntimeEnv {
    /// Read `SERVER_URL` and `ADMIN_API_TOKEN` from the process environment.
    pub fn from_env() -> Self {
        Self {
            server_url: std::env::var(SERVER_URL_VAR).ok(),
            admin_api_token: std::env::var(ADMIN_API_TOKEN_VAR).ok(),
        }
    }
}

/// Backend location and credentials used by a single tool call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    server_url: Option<String>,
    admin_api_token: Option<String>,
}

impl RuntimeConfig {
    pub fn new(server_url: impl Into<String>, admin_api_token: Option<String>) -> Self {
        Self {
            server_url: Some(server_url.into()),
            admin_api_token,
        }
    }

    /// Apply host-provided values. Absent or empty values leave the current
    /// setting untouched, so re-applying the same environment is a no-op.
    pub fn configure(&mut self, env: &RuntimeEnv) {
        if let Some(url) = env.server_url.as_deref().filter(|u| !u.is_empty()) {
            self.server_url = Some(url.to_string());
        }
        if let Some(token) = env.admin_api_token.as_deref().filter(|t| !t.is_empty()) {
            self.admin_api_token = Some(token.to_string());
        }
    }

    /// The backend base URL.
    ///
    /// Fails with a configuration error when no URL was ever provided.
    pub fn server_url(&self) -> Result<&str> {
        self.server_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::config(format!("{SERVER_URL_VAR} is not configured")))
    }

    /// The admin token sent with mutating calls; empty when unset.
    pub fn admin_api_token(&self) -> &str {
        self.admin_api_token.as_deref().unwrap_or_default()
    }

    pub fn is_configured(&self) -> bool {
        self.server_url().is_ok()
    }
}

impl From<&BackendConfig> for RuntimeConfig {
    fn from(config: &BackendConfig) -> Self {
        Self {
            server_url: config.server_url.clone(),
            admin_api_token: config.admin_api_token.clone(),
        }
    }
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("server_url", &self.server_url)
            .field(
                "admin_api_token",
                &self.admin_api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(url: Option<&str>, token: Option<&str>) -> RuntimeEnv {
        RuntimeEnv {
            server_url: url.map(str::to_string),
            admin_api_token: token.map(str::to_string),
        }
    }

    #[test]
    fn test_unconfigured_server_url_is_config_error() {
        let runtime = RuntimeConfig::default();
        let err = runtime.server_url().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("SERVER_URL is not configured"));
        assert!(!runtime.is_configured());
    }

    #[test]
    fn test_configure_sets_values() {
        let mut runtime = RuntimeConfig::default();
        runtime.configure(&env(Some("https://api.example.com"), Some("secret")));
        assert_eq!(runtime.server_url().unwrap(), "https://api.example.com");
        assert_eq!(runtime.admin_api_token(), "secret");
    }

    #[test]
    fn test_configure_ignores_empty_and_missing() {
        let mut runtime = RuntimeConfig::new("https://a.example.com", Some("t1".to_string()));
        runtime.configure(&env(Some(""), None));
        assert_eq!(runtime.server_url().unwrap(), "https://a.example.com");
        assert_eq!(runtime.admin_api_token(), "t1");
    }

    #[test]
    fn test_configure_overwrites() {
        let mut runtime = RuntimeConfig::new("https://a.example.com", None);
        runtime.configure(&env(Some("https://b.example.com"), Some("t2")));
        runtime.configure(&env(Some("https://b.example.com"), Some("t2")));
        assert_eq!(runtime.server_url().unwrap(), "https://b.example.com");
        assert_eq!(runtime.admin_api_token(), "t2");
    }

    #[test]
    fn test_missing_token_is_empty() {
        let runtime = RuntimeConfig::new("https://a.example.com", None);
        assert_eq!(runtime.admin_api_token(), "");
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let runtime = RuntimeConfig::new("https://a.example.com", Some("hunter2".to_string()));
        let debug_str = format!("{:?}", runtime);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("hunter2"));
    }
}
