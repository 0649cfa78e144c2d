//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, JWT secret, the completion
//! service, storage paths, and pipeline bounds.

use serde::Deserialize;
use specdraft_llm::{CompletionConfig, DEFAULT_ENDPOINT};
use specdraft_pipeline::PipelineConfig;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing or invalid field
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Completion-service settings
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionSection {
    /// Service endpoint (e.g. "http://localhost:11434")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model and sampling parameters
    #[serde(flatten)]
    pub config: CompletionConfig,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// Storage paths
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
    /// SQLite database path (":memory:" for ephemeral)
    pub database_path: String,

    /// Root directory for archived requirement artifacts
    pub artifact_dir: String,
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g. "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g. 7860)
    pub bind_port: u16,

    /// JWT secret for signing session tokens
    pub jwt_secret: String,

    /// Token expiry in seconds (default: 3600 = 1 hour)
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,

    /// Completion-service settings
    pub completion: CompletionSection,

    /// Storage paths
    pub storage: StorageSection,

    /// Pipeline bounds
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Default token expiry: 1 hour
fn default_token_expiry() -> u64 {
    3600
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;

        if config.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("jwt_secret must not be empty".to_string()));
        }
        config
            .pipeline
            .validate()
            .map_err(ConfigError::Invalid)?;

        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 7860,
            jwt_secret: "test-secret-key-do-not-use-in-production".to_string(),
            token_expiry_secs: 3600,
            completion: CompletionSection {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                config: CompletionConfig::for_model("mistral"),
            },
            storage: StorageSection {
                database_path: ":memory:".to_string(),
                artifact_dir: "artifacts".to_string(),
            },
            pipeline: PipelineConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
