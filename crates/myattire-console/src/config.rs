/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed console configuration
[POS]:    Configuration layer - API endpoint and UI setup
[UPDATE]: When adding new configuration options
*/

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use myattire_adapter::ClientConfig;

/// Top-level configuration for the admin console
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConsoleConfig {
    /// Remote service settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
    /// Terminal UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the My Attire service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Default tracing filter, overridable with --log-level
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file; the TUI keeps logs off the terminal
    #[serde(default)]
    pub file: Option<String>,
}

/// Terminal UI configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Redraw interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5050".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_ms() -> u64 {
    250
}

impl ConsoleConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the given file, or fall back to defaults when it does not exist
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Adapter client configuration derived from the api section
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: ConsoleConfig = serde_yaml::from_str("{}").expect("parse");

        assert_eq!(config.api.base_url, "http://localhost:5050");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.ui.tick_ms, 250);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = r#"
api:
  base_url: "http://10.0.0.5:5050"
log:
  level: "debug"
"#;
        let config: ConsoleConfig = serde_yaml::from_str(yaml).expect("parse");

        assert_eq!(config.api.base_url, "http://10.0.0.5:5050");
        assert_eq!(config.api.connect_timeout_secs, 10);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file, None);
    }

    #[test]
    fn client_config_carries_timeouts() {
        let config = ConsoleConfig::default();
        let client_config = config.client_config();

        assert_eq!(client_config.base_url, "http://localhost:5050");
        assert_eq!(client_config.timeout, Duration::from_secs(30));
        assert_eq!(client_config.connect_timeout, Duration::from_secs(10));
    }
}
