//! Configuration loading for businessmap-mcp
//!
//! Configuration is merged from, lowest priority first:
//! 1. Default values
//! 2. A TOML file at `BUSINESSMAP_CONFIG_PATH`, or
//!    `~/.config/businessmap-mcp/config.toml`
//! 3. Environment variables `BUSINESSMAP_API_URL`, `BUSINESSMAP_API_KEY`,
//!    `BUSINESSMAP_READ_ONLY`, `BUSINESSMAP_DEFAULT_WORKSPACE_ID`

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_API_URL: &str = "BUSINESSMAP_API_URL";
pub const ENV_API_KEY: &str = "BUSINESSMAP_API_KEY";
pub const ENV_READ_ONLY: &str = "BUSINESSMAP_READ_ONLY";
pub const ENV_DEFAULT_WORKSPACE_ID: &str = "BUSINESSMAP_DEFAULT_WORKSPACE_ID";
const ENV_CONFIG_PATH: &str = "BUSINESSMAP_CONFIG_PATH";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    /// When set, no write tools are registered
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub default_workspace_id: Option<String>,
}

/// Upstream API connection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://acme.kanbanize.com/api/v2`
    #[serde(default)]
    pub url: String,
    /// Static key sent in the `APIKEY` header
    #[serde(default)]
    pub key: String,
}

impl Config {
    /// Load configuration from the config file and process environment
    pub fn load() -> Result<Self> {
        let path = Self::find_config_path();
        let config = Self::from_sources(path.as_deref(), |name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Merge an optional TOML file with values from `env`
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn from_sources<F>(path: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                let content = std::fs::read_to_string(path)?;
                toml::from_str(&content)?
            }
            _ => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        if let Some(url) = env(ENV_API_URL) {
            config.api.url = url;
        }
        if let Some(key) = env(ENV_API_KEY) {
            config.api.key = key;
        }
        if let Some(flag) = env(ENV_READ_ONLY) {
            config.read_only = flag == "true";
        }
        if let Some(workspace) = env(ENV_DEFAULT_WORKSPACE_ID).filter(|w| !w.is_empty()) {
            config.default_workspace_id = Some(workspace);
        }

        Ok(config)
    }

    /// Settings that must be present for the server to reach the API
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api.url.trim().is_empty() {
            missing.push(ENV_API_URL);
        }
        if self.api.key.trim().is_empty() {
            missing.push(ENV_API_KEY);
        }
        missing
    }

    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            let list: Vec<String> = missing.iter().map(|name| format!("- {name}")).collect();
            bail!(
                "Invalid configuration. The following settings are missing:\n{}",
                list.join("\n")
            );
        }
        Ok(())
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            return Some(PathBuf::from(path));
        }

        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("businessmap-mcp")
                .join("config.toml")
        })
    }
}
