//! Configuration handling for the intake form

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default base URL of the submission endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";

/// Environment variable overriding the configured endpoint
pub const ENDPOINT_ENV: &str = "INTAKE_ENDPOINT";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntakeConfig {
    /// Base URL the form is posted to
    pub endpoint: Option<String>,
    /// Request timeout; none is applied when unset
    pub request_timeout_secs: Option<u64>,
}

impl IntakeConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "intake", "intake-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: IntakeConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded configuration from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Endpoint to use, honouring the environment override
    pub fn endpoint(&self) -> String {
        self.endpoint_with_override(std::env::var(ENDPOINT_ENV).ok())
    }

    fn endpoint_with_override(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.is_empty())
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IntakeConfig::default();
        assert!(config.endpoint.is_none());
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = IntakeConfig {
            endpoint: Some("https://forms.example.com".to_string()),
            request_timeout_secs: Some(10),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: IntakeConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.endpoint,
            Some("https://forms.example.com".to_string())
        );
        assert_eq!(parsed.request_timeout_secs, Some(10));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: IntakeConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.endpoint.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"endpoint": "http://localhost:8080", "unknown_field": "value"}"#;
        let parsed: IntakeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.endpoint, Some("http://localhost:8080".to_string()));
    }

    #[test]
    fn test_endpoint_falls_back_to_default() {
        let config = IntakeConfig::default();
        assert_eq!(config.endpoint_with_override(None), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_endpoint_prefers_file_value() {
        let config = IntakeConfig {
            endpoint: Some("http://file:1".to_string()),
            ..Default::default()
        };
        assert_eq!(config.endpoint_with_override(None), "http://file:1");
    }

    #[test]
    fn test_env_override_wins_unless_empty() {
        let config = IntakeConfig {
            endpoint: Some("http://file:1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint_with_override(Some("http://env:2".to_string())),
            "http://env:2"
        );
        assert_eq!(
            config.endpoint_with_override(Some(String::new())),
            "http://file:1"
        );
    }

    #[test]
    fn test_config_path_ends_with_config_json() {
        if let Some(path) = IntakeConfig::config_path() {
            assert!(path.ends_with("config.json"));
        }
    }
}
