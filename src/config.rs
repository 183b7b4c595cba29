//! Configuration loading
//!
//! Configuration is read from `$XDG_CONFIG_HOME/shared-time/config.toml`
//! (`~/.config/shared-time/config.toml`). A missing file means defaults.
//!
//! ```toml
//! store_path = "/home/me/family/members.json"
//!
//! [provider]
//! base_url = "https://api.worldbank.org/v2"
//! timeout_secs = 30
//! enabled = true
//!
//! [fallback]
//! "Japan" = { male = 81.1, female = 87.1 }
//! "Default" = { male = 72.0, female = 77.0 }
//! ```

use crate::fallback::{FallbackTable, YearsPair};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "shared-time";

/// Main configuration struct
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Life-expectancy provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Per-country overrides merged over the built-in fallback table
    #[serde(default)]
    pub fallback: BTreeMap<String, YearsPair>,

    /// Settings store location (defaults to the data directory)
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

/// World Bank provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// `false` skips the network and always uses the fallback table
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_base_url() -> String {
    "https://api.worldbank.org/v2".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_enabled() -> bool {
    true
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            enabled: default_enabled(),
        }
    }
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            log::debug!("no config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config")
    }

    /// Built-in fallback table with this config's overrides applied.
    pub fn fallback_table(&self) -> FallbackTable {
        FallbackTable::default().merged(&self.fallback)
    }

    /// Settings store path: configured value or `$XDG_DATA_HOME/shared-time/members.json`.
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| data_dir().join("members.json"))
    }

    /// `$XDG_CONFIG_HOME/shared-time/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
