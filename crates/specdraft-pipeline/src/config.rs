//! Configuration for the generation pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum time for the completion round trip (seconds).
    ///
    /// The completion call is the only stage that suspends for an
    /// externally-determined duration; this bound keeps a slow upstream
    /// from holding a concurrency slot indefinitely.
    pub completion_timeout_secs: u64,
}

impl PipelineConfig {
    /// Completion timeout as a Duration
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.completion_timeout_secs == 0 {
            return Err("completion_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            completion_timeout_secs: 120,
        }
    }
}
