//! Configuration for the Classifier

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Maximum time for a single backend call (seconds)
    #[serde(default = "default_backend_timeout_secs")]
    pub backend_timeout_secs: u64,

    /// Ask the backend for JSON output when it supports a structured mode
    #[serde(default = "default_true")]
    pub structured_output: bool,
}

fn default_backend_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl ClassifierConfig {
    /// Get the backend timeout as a Duration
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.backend_timeout_secs == 0 {
            return Err("backend_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend_timeout_secs: default_backend_timeout_secs(),
            structured_output: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClassifierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = ClassifierConfig {
            backend_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = ClassifierConfig::from_toml("structured_output = false").unwrap();
        assert_eq!(config.backend_timeout_secs, 30);
        assert!(!config.structured_output);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClassifierConfig {
            backend_timeout_secs: 45,
            structured_output: false,
        };
        let parsed = ClassifierConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
