//! Configuration loading.
//!
//! Settings live in `~/.joblens/config.json`; environment variables
//! override file values so credentials never have to be written to disk:
//!
//! 1. `JOBLENS_API_KEY` / `JOBLENS_BASE_ID` / `JOBLENS_TABLE` env overrides
//! 2. `~/.joblens/config.json`
//! 3. Built-in defaults (no credentials, default detector tuning)

use crate::detect::DetectorTuning;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Credentials and table coordinates for the record sink.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub api_key: String,
    pub base_id: String,
    pub table: String,
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sink: SinkConfig,
    pub tuning: DetectorTuning,
    /// Page fetch timeout in milliseconds.
    pub fetch_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sink: SinkConfig::default(),
            tuning: DetectorTuning::default(),
            fetch_timeout_ms: 15_000,
        }
    }
}

impl Config {
    /// Default config file path: `~/.joblens/config.json`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".joblens")
            .join("config.json")
    }

    /// Load from the default path with environment overrides applied.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file(&Self::default_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load a config file; a missing file yields defaults.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config at {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("config at {} is not valid JSON", path.display()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("JOBLENS_API_KEY") {
            self.sink.api_key = key;
        }
        if let Ok(base) = std::env::var("JOBLENS_BASE_ID") {
            self.sink.base_id = base;
        }
        if let Ok(table) = std::env::var("JOBLENS_TABLE") {
            self.sink.table = table;
        }
    }

    /// Fail early when capture is attempted without credentials.
    pub fn require_sink(&self) -> Result<&SinkConfig> {
        if self.sink.api_key.is_empty() {
            anyhow::bail!(
                "no API key configured — set JOBLENS_API_KEY or add \"sink.api_key\" to {}",
                Self::default_path().display()
            );
        }
        if self.sink.base_id.is_empty() || self.sink.table.is_empty() {
            anyhow::bail!("sink base_id/table not configured");
        }
        Ok(&self.sink)
    }
}
