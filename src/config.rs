//! Tool configuration.
//!
//! Handles loading and validating an optional `config.toml` placed in the
//! source directory. Config files are sparse — override just the values you
//! want; everything else keeps its stock default. Unknown keys are rejected
//! to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [grid]
//! per_page = 20                       # Records per grid page
//!
//! [export]
//! filename = "wildlife_tags.json"     # Default export document name
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub grid: GridConfig,
    pub export: ExportConfig,
}

/// Grid view settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Records shown per page in the grid listing.
    pub per_page: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { per_page: 20 }
    }
}

/// Export document settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Filename for the exported tag document.
    pub filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: "wildlife_tags.json".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.per_page == 0 {
            return Err(ConfigError::Validation(
                "grid.per_page must be at least 1".into(),
            ));
        }
        if self.export.filename.trim().is_empty() {
            return Err(ConfigError::Validation(
                "export.filename must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Load `config.toml` from the source directory, falling back to defaults
/// when no file exists.
pub fn load_config(source: &Path) -> Result<Config, ConfigError> {
    let path = source.join("config.toml");
    let config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        Config::default()
    };
    config.validate()?;
    Ok(config)
}

/// The stock `config.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    "\
# focal-point configuration
# All options are optional - defaults shown below

[grid]
per_page = 20                       # Records per grid page

[export]
filename = \"wildlife_tags.json\"     # Default export document name
"
    .to_string()
}
