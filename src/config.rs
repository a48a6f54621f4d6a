// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::paths::AppPaths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use strum::EnumIter;

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Only show notifications addressed to this user.
    #[serde(default)]
    pub default_user: Option<String>,
    #[serde(default)]
    pub output: OutputFormat,
    /// Print per-day summaries instead of individual events.
    #[serde(default)]
    pub summary: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_user: None,
            output: OutputFormat::default(),
            summary: false,
            // Match the serde defaults
            log_level: default_log_level(),
        }
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl Config {
    /// Load the configuration from its standard location.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = AppPaths::get_config_file_path()?;
        Self::load_from(&path)
    }

    /// Load the configuration from an explicit path.
    /// A missing file yields the defaults; unreadable or invalid files are errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at '{}', using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        contents
            .parse::<Config>()
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = AppPaths::get_config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)
            .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
        Ok(())
    }

    /// Maps `log_level` onto a filter, falling back to `Warn` for unknown names.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}
