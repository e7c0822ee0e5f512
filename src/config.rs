use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::spell_check::{DEFAULT_ENDPOINT, DEFAULT_UPSTREAM_URL, MAX_TEXT_CHARS};

/// Name given to saved documents when no output path is requested
pub const DEFAULT_OUTPUT_NAME: &str = "수정된문서.hwpx";

/// Configuration for hwpx-spell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub spell_check: SpellCheckConfig,
    pub server: ServerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellCheckConfig {
    /// JSON endpoint used by `check`
    pub endpoint: String,
    /// Remote speller used by `serve` and `check --direct`
    pub upstream_url: String,
    pub max_chars: usize,
    /// Request timeout; the transport default applies when unset
    pub timeout_secs: Option<u64>,
}

impl Default for SpellCheckConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            max_chars: MAX_TEXT_CHARS,
            timeout_secs: None,
        }
    }
}

impl SpellCheckConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

impl Config {
    /// The user's config file, or defaults when there is none.
    pub fn load() -> Result<Self> {
        match Self::get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// `<config dir>/hwpx-spell/config.toml`
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hwpx-spell").join("config.toml"))
    }

    /// Write the defaults to the user's config file and return its path.
    pub fn init_default() -> Result<PathBuf> {
        let path = Self::get_config_path()
            .ok_or_else(|| anyhow!("No configuration directory on this platform"))?;
        Config::default().save_to(&path)?;
        Ok(path)
    }
}
