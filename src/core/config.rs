//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (with `.env` support) or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default Feedly API base URL.
pub const DEFAULT_FEEDLY_BASE_URL: &str = "https://api.feedly.com/v3";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream Feedly API configuration.
    pub feedly: FeedlyConfig,
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
}

/// Upstream Feedly API configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct FeedlyConfig {
    /// Base URL of the Feedly REST API (no trailing slash).
    pub base_url: String,

    /// Bearer token for upstream authentication.
    ///
    /// Optional: without a token the server still issues upstream calls
    /// (with no Authorization header) and forwards the resulting 401.
    pub token: Option<String>,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for FeedlyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedlyConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for FeedlyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FEEDLY_BASE_URL.to_string(),
            token: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "feedly-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            feedly: FeedlyConfig::default(),
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
    /// Server/transport variables are prefixed with `MCP_` (for example
    /// `MCP_SERVER_NAME`, `MCP_HTTP_PORT`); upstream credentials use
    /// `FEEDLY_TOKEN` and `FEEDLY_BASE_URL`.
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

        if let Ok(base_url) = std::env::var("FEEDLY_BASE_URL") {
            config.feedly.base_url = base_url.trim_end_matches('/').to_string();
        }

        match std::env::var("FEEDLY_TOKEN") {
            Ok(token) if !token.is_empty() => {
                config.feedly.token = Some(token);
                info!("Feedly token loaded from environment");
            }
            _ => {
                warn!(
                    "FEEDLY_TOKEN not set - upstream calls will be issued \
                     without authentication and are expected to fail with 401"
                );
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_token_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("FEEDLY_TOKEN", "test_token_12345");
        }
        let config = Config::from_env();
        assert_eq!(config.feedly.token.as_deref(), Some("test_token_12345"));
        unsafe {
            std::env::remove_var("FEEDLY_TOKEN");
        }
    }

    #[test]
    fn test_token_absent_is_none() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("FEEDLY_TOKEN");
        }
        let config = Config::from_env();
        assert!(config.feedly.token.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("FEEDLY_BASE_URL", "https://example.com/v3/");
        }
        let config = Config::from_env();
        assert_eq!(config.feedly.base_url, "https://example.com/v3");
        unsafe {
            std::env::remove_var("FEEDLY_BASE_URL");
        }
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let feedly = FeedlyConfig {
            base_url: DEFAULT_FEEDLY_BASE_URL.to_string(),
            token: Some("super_secret_token".to_string()),
        };
        let debug_str = format!("{:?}", feedly);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }

    #[test]
    fn test_default_base_url() {
        let config = Config::default();
        assert_eq!(config.feedly.base_url, DEFAULT_FEEDLY_BASE_URL);
    }
}
