//! Client Configuration
//!
//! GraphQL endpoints, auth token and log level. Defaults are baked in at build
//! time; a JSON object in `localStorage` overrides any subset of the fields.

use serde::{Deserialize, Serialize};

/// `localStorage` key holding the override object
pub const STORAGE_KEY: &str = "todo-feed.config";

const DEFAULT_HTTP_ENDPOINT: &str = "https://hasura.io/learn/graphql";
const DEFAULT_WS_ENDPOINT: &str = "wss://hasura.io/learn/graphql";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("browser storage unavailable")]
    StorageUnavailable,

    #[error("storage access failed: {0}")]
    Storage(String),

    #[error("{field} must start with one of {schemes:?}, got {value:?}")]
    InvalidEndpoint {
        field: &'static str,
        schemes: &'static [&'static str],
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub http_endpoint: String,
    pub ws_endpoint: String,
    pub auth_token: Option<String>,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http_endpoint: option_env!("TODO_GRAPHQL_HTTP").unwrap_or(DEFAULT_HTTP_ENDPOINT).to_string(),
            ws_endpoint: option_env!("TODO_GRAPHQL_WS").unwrap_or(DEFAULT_WS_ENDPOINT).to_string(),
            auth_token: option_env!("TODO_AUTH_TOKEN").map(str::to_string).filter(|t| !t.is_empty()),
            log_level: option_env!("TODO_LOG_LEVEL").unwrap_or(DEFAULT_LOG_LEVEL).to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse an override object; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_scheme("http_endpoint", &self.http_endpoint, &["http://", "https://"])?;
        check_scheme("ws_endpoint", &self.ws_endpoint, &["ws://", "wss://"])?;
        Ok(())
    }

    /// Value for the `Authorization` header, if a token is configured
    pub fn authorization(&self) -> Option<String> {
        self.auth_token.as_deref().map(|token| format!("Bearer {}", token))
    }

    /// Defaults overlaid with the stored override.
    /// A broken override is reported and ignored.
    pub fn load() -> (Self, Option<ConfigError>) {
        match Self::load_stored() {
            Ok(Some(config)) => (config, None),
            Ok(None) => (Self::default(), None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    fn load_stored() -> Result<Option<Self>, ConfigError> {
        let storage = local_storage()?;
        let stored = storage
            .get_item(STORAGE_KEY)
            .map_err(|e| ConfigError::Storage(format!("{:?}", e)))?;
        stored.as_deref().map(Self::from_json).transpose()
    }
}

fn check_scheme(field: &'static str, value: &str, schemes: &'static [&'static str]) -> Result<(), ConfigError> {
    if schemes.iter().any(|s| value.starts_with(s)) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEndpoint { field, schemes, value: value.to_string() })
    }
}

fn local_storage() -> Result<web_sys::Storage, ConfigError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(ConfigError::StorageUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        ClientConfig::default().validate().unwrap();
    }

    #[test]
    fn test_override_keeps_missing_fields() {
        let config = ClientConfig::from_json(r#"{"auth_token":"abc","log_level":"debug"}"#).unwrap();
        assert_eq!(config.auth_token.as_deref(), Some("abc"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.http_endpoint, ClientConfig::default().http_endpoint);
        assert_eq!(config.authorization().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_rejects_wrong_scheme() {
        let err = ClientConfig::from_json(r#"{"ws_endpoint":"https://example.com/graphql"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { field: "ws_endpoint", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(ClientConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
