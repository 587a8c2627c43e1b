//! Configuration loading for the metrics tracker
//!
//! JSON file with three optional sections:
//! - `name`: service name shown in logs
//! - `server`: bind host and port
//! - `duplicate_policy`: what logging an existing transaction id does

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracker_ports::DuplicatePolicy;

/// Root configuration for the metrics tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

fn default_name() -> String {
    "API Metrics Tracker".to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            server: ServerConfig::default(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Defaults, with `HOST` and `PORT` taken from the environment when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            config.server.port = port;
        }
        config
    }
}

/// Server bind configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = TrackerConfig::from_json("{}").unwrap();

        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.duplicate_policy, DuplicatePolicy::KeepExisting);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "name": "desk-7",
            "server": { "host": "127.0.0.1", "port": 9000 },
            "duplicate_policy": "reject"
        }"#;

        let config = TrackerConfig::from_json(json).unwrap();

        assert_eq!(config.name, "desk-7");
        assert_eq!(config.server.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_parse_replace_policy_with_partial_server() {
        let json = r#"{ "server": { "port": 8181 }, "duplicate_policy": "replace" }"#;

        let config = TrackerConfig::from_json(json).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8181);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Replace);
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let result = TrackerConfig::from_json(r#"{ "duplicate_policy": "append" }"#);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TrackerConfig::from_file("/nonexistent/tracker.json");

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
