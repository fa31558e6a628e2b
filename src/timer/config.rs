//! Presentation configuration for timing reports
//!
//! Configuration is plain JSON with PascalCase keys, e.g.
//! `{ "DefaultLabel": "it", "Enabled": true, "Color": false }`.
//! Missing keys fall back to their defaults.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::TimeprintError;

/// Environment variable naming a JSON file read by [`Config::from_env`].
pub const CONFIG_ENV: &str = "TIMEPRINT_CONFIG";

/// Label used for scopes entered without a name.
pub const DEFAULT_LABEL: &str = "it";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "DefaultLabel", deserialize_with = "validate_label")]
    pub default_label: String,
    /// When false, scopes are still tracked but nothing is written.
    #[serde(rename = "Enabled")]
    pub enabled: bool,
    /// Render the label in bold.
    #[serde(rename = "Color")]
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_label: DEFAULT_LABEL.to_string(),
            enabled: true,
            color: false,
        }
    }
}

fn validate_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.trim().is_empty() {
        Err(serde::de::Error::custom("DefaultLabel must not be empty"))
    } else {
        Ok(value)
    }
}

impl Config {
    pub fn from_json(content: &str) -> Result<Self, TimeprintError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TimeprintError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load the file named by `TIMEPRINT_CONFIG`, or the defaults when unset.
    pub fn from_env() -> Result<Self, TimeprintError> {
        Self::from_var(CONFIG_ENV)
    }

    pub(crate) fn from_var(key: &str) -> Result<Self, TimeprintError> {
        match env::var_os(key) {
            Some(path) if !path.is_empty() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}
