//! Application configuration
//!
//! Settings come from, in increasing precedence: built-in defaults, the
//! TOML file at `<config_home>/savings/config.toml` (or `$SAVINGS_CONFIG`),
//! the `SAVINGS_DATA_DIR` environment variable, and finally the CLI flag.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_ENV: &str = "SAVINGS_CONFIG";
pub const DATA_DIR_ENV: &str = "SAVINGS_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding `platforms.json`; relative paths resolve against
    /// the working directory.
    pub data_dir: PathBuf,
    /// Prefix used when printing amounts
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            currency_symbol: "$".to_string(),
        }
    }
}

impl Config {
    /// Location of the user config file, if one can be determined.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dir_spec::config_home().map(|dir| dir.join("savings").join("config.toml"))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration")
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml_str(&contents).with_context(|| format!("In config file {:?}", path))
    }

    /// Resolve the effective configuration.
    pub fn load(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };

        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = data_dir_override {
            config.data_dir = dir;
        }

        debug!("Using data directory {:?}", config.data_dir);
        Ok(config)
    }
}
