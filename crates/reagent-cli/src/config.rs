//! Configuration for the `reagent` binary.
//!
//! Values come from an optional TOML file (`reagent.toml` in the working
//! directory, or the path given with `--config`). Every field has a default,
//! and command-line flags override whatever the file says.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "reagent.toml";

/// Method used when neither the file nor `--method` names one.
pub const DEFAULT_METHOD: &str = "standard";

/// Complete CLI configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Directory holding `items.*` and `recipes.*`.
    pub data_dir: PathBuf,
    /// Owned quantities file.
    pub inventory: PathBuf,
    /// Price overrides file, including the last refresh time.
    pub prices: PathBuf,
    /// Item to resolve when `--target` is not given.
    pub target: Option<String>,
    pub quantity: u64,
    /// Preferred crafting method tag. Defaults to `standard`, the popular
    /// route; `None` takes each item's first recipe.
    pub method: Option<String>,
    /// Minimum minutes between market refreshes.
    pub cooldown_minutes: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            inventory: PathBuf::from("inventory.toml"),
            prices: PathBuf::from("prices.toml"),
            target: None,
            quantity: 1,
            method: Some(DEFAULT_METHOD.to_string()),
            cooldown_minutes: 30,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists, or
    /// fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file is missing, or if the
    /// file cannot be parsed.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
