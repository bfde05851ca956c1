//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub bridge: BridgeConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_state_db_path")]
    pub state_db_path: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Run against an empty in-memory browser instead of the bridge
    #[serde(default)]
    pub offline: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_bridge_base_url")]
    pub base_url: String,

    #[serde(default = "default_bridge_timeout")]
    pub timeout_secs: u64,

    /// Env var holding the bearer token; empty disables auth
    #[serde(default = "default_bridge_token_env")]
    pub auth_token_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

// Default value functions
fn default_state_db_path() -> PathBuf {
    PathBuf::from("./tabtidy.sqlite")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bridge_base_url() -> String {
    "http://127.0.0.1:9222".to_string()
}

fn default_bridge_timeout() -> u64 {
    10
}

fn default_bridge_token_env() -> String {
    "TABTIDY_BRIDGE_TOKEN".to_string()
}

fn default_poll_interval() -> u64 {
    2
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            state_db_path: default_state_db_path(),
            log_level: default_log_level(),
            offline: false,
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: default_bridge_base_url(),
            timeout_secs: default_bridge_timeout(),
            auth_token_env: default_bridge_token_env(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("TABTIDY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# tabtidy configuration

[general]
state_db_path = "./tabtidy.sqlite"
log_level = "info"
# Run against an empty in-memory browser instead of the bridge
offline = false

[bridge]
base_url = "http://127.0.0.1:9222"
timeout_secs = 10
# Env var holding the bearer token; leave as-is and unset for no auth
auth_token_env = "TABTIDY_BRIDGE_TOKEN"

[watch]
poll_interval_secs = 2
"#
        .to_string()
    }
}
