/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed console configuration
[POS]:    Configuration layer - console setup
[UPDATE]: When adding new configuration options
*/

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the task console
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    /// Workflow engine connection settings
    pub server: ServerConfig,
    /// Dashboard view settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Workflow engine connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Engine base URL, e.g. "https://engine.example.com"
    pub base_url: String,
    /// Bearer token attached to every request; how it is obtained is out
    /// of the console's hands
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Dashboard view settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Background poll cadence in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Task list page size
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            page_size: default_page_size(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    20
}

impl ConsoleConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Default config location: `<user config dir>/flowdesk/console.yaml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flowdesk")
            .join("console.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let yaml = "server:\n  base_url: https://engine.example.com\n";
        let config: ConsoleConfig = serde_yaml::from_str(yaml).expect("yaml");
        assert_eq!(config.server.base_url, "https://engine.example.com");
        assert!(config.server.auth_token.is_none());
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.dashboard.poll_interval_secs, 30);
        assert_eq!(config.dashboard.page_size, 20);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let yaml = concat!(
            "server:\n",
            "  base_url: http://localhost:8080\n",
            "  auth_token: abc123\n",
            "  timeout_secs: 5\n",
            "dashboard:\n",
            "  poll_interval_secs: 10\n",
            "  page_size: 50\n",
        );
        let config: ConsoleConfig = serde_yaml::from_str(yaml).expect("yaml");
        assert_eq!(config.server.auth_token.as_deref(), Some("abc123"));
        assert_eq!(config.server.timeout_secs, 5);
        assert_eq!(config.dashboard.poll_interval_secs, 10);
        assert_eq!(config.dashboard.page_size, 50);
    }
}
