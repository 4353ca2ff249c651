use crate::index::types::{IndexConfig, MAX_RESULTS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "docsift";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the platform config directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Results kept per query (top-K capacity)
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Index builder settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Command used to open a chosen result URL; `$BROWSER` when unset
    #[serde(default)]
    pub browser: Option<String>,
}

fn default_max_results() -> usize {
    MAX_RESULTS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            index: IndexConfig::default(),
            browser: None,
        }
    }
}

impl AppConfig {
    /// Load config from the config directory, or return defaults if not found
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(?config, "Loaded config from {}", path.display());
        Ok(config)
    }

    /// Browser command: config value, then `$BROWSER`
    pub fn browser_command(&self) -> Option<String> {
        self.browser
            .clone()
            .or_else(|| std::env::var("BROWSER").ok())
            .filter(|cmd| !cmd.trim().is_empty())
    }
}

/// Path of the config file, if the platform has a config directory
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}
