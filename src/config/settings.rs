//! Parsing and validation for treeguard.toml settings files

use crate::error::ConfigError;
use crate::types::GlobPattern;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file looked up in the project directory
pub const SETTINGS_FILE: &str = "treeguard.toml";

/// Rules file used when neither the command line nor the settings name one
pub const DEFAULT_RULES_FILE: &str = ".treeguard";

/// Main settings struct for treeguard.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Project settings
    pub treeguard: GuardMeta,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads `<directory>/treeguard.toml`, or defaults when there is none
    pub fn discover(directory: &Path) -> Result<Self, ConfigError> {
        let path = directory.join(SETTINGS_FILE);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        tracing::info!(path = %path.display(), "using settings file");
        Self::load(&path)
    }

    /// Path of the rules file inside `directory`
    pub fn rules_path(&self, directory: &Path) -> PathBuf {
        let rules = self
            .treeguard
            .rules
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_RULES_FILE));
        directory.join(rules)
    }

    /// Validate the settings
    fn validate(&self) -> Result<(), ConfigError> {
        if self.treeguard.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.treeguard.version
            )));
        }

        if let Some(rules) = &self.treeguard.rules
            && rules.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "The rules file path must not be empty".to_string(),
            ));
        }

        // Validate glob patterns by attempting to compile them with globset
        for pattern in &self.treeguard.exclude {
            globset::Glob::new(pattern.as_str()).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid exclude glob pattern '{}': {}",
                    pattern.as_str(),
                    e
                ))
            })?;
        }

        Ok(())
    }
}

/// Project section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardMeta {
    /// Configuration version (must be "1")
    pub version: String,

    /// Rules file, relative to the project directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<PathBuf>,

    /// Treat files ignored by the root .gitignore as allowed
    #[serde(default)]
    pub gitignore: bool,

    /// Paths left out of the directory walk
    #[serde(default)]
    pub exclude: Vec<GlobPattern>,
}

impl Default for GuardMeta {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            rules: None,
            gitignore: false,
            exclude: Vec::new(),
        }
    }
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output options
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}
