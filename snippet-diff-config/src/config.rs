//! The top-level `Config` struct plus YAML persistence and path helpers.
//!
//! Covers:
//! - `load` / `load_from` / `save_to` (YAML file I/O with atomic write)
//! - XDG-compliant path helpers (`config_path`, `config_dir`)
//! - `validate` for fields whose zero value would disable the engine

use crate::defaults;
use crate::error::ConfigError;
use crate::types::{LogLevel, ThemeConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the diff viewer (lives in `config.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Verbosity of the debug log file.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Start in split layout when a second text is supplied.
    #[serde(default = "defaults::bool_false")]
    pub default_split: bool,

    /// Collapse unchanged regions into fold markers.
    #[serde(default = "defaults::bool_false")]
    pub fold_unchanged: bool,

    /// Unchanged lines kept on each side of a change when folding.
    #[serde(default = "defaults::fold_context_lines")]
    pub fold_context_lines: usize,

    /// Reject inputs with more lines than this (per side).
    #[serde(default = "defaults::max_lines")]
    pub max_lines: usize,

    /// Reject inputs larger than this many bytes (per side).
    #[serde(default = "defaults::max_bytes")]
    pub max_bytes: usize,

    /// Columns used when the terminal width cannot be detected.
    #[serde(default = "defaults::terminal_width")]
    pub terminal_width: usize,

    /// Below this width the painter falls back to unified output even in split layout.
    #[serde(default = "defaults::side_by_side_min_width")]
    pub side_by_side_min_width: usize,

    /// Draw the line number gutter when a diff is shown.
    #[serde(default = "defaults::bool_true")]
    pub show_line_numbers: bool,

    /// Emit ANSI colors.
    #[serde(default = "defaults::bool_true")]
    pub color: bool,

    /// Palette overrides.
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            default_split: defaults::bool_false(),
            fold_unchanged: defaults::bool_false(),
            fold_context_lines: defaults::fold_context_lines(),
            max_lines: defaults::max_lines(),
            max_bytes: defaults::max_bytes(),
            terminal_width: defaults::terminal_width(),
            side_by_side_min_width: defaults::side_by_side_min_width(),
            show_line_numbers: defaults::bool_true(),
            color: defaults::bool_true(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the default path, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file is not an error: defaults are returned. Unlike the
    /// interactive terminal this viewer never writes a default file on load.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Config path: {:?}", path);

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config = Self::from_yaml(&contents)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document deserializes as unit; treat it as all defaults.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml_ng::from_str(contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        Ok(())
    }

    /// Check fields whose values would make the engine unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_lines == 0 {
            return Err(ConfigError::Validation(
                "max_lines must be greater than zero".to_string(),
            ));
        }
        if self.max_bytes == 0 {
            return Err(ConfigError::Validation(
                "max_bytes must be greater than zero".to_string(),
            ));
        }
        if self.terminal_width == 0 {
            return Err(ConfigError::Validation(
                "terminal_width must be greater than zero".to_string(),
            ));
        }
        if let Some(palette) = &self.theme.palette
            && palette.len() != 16
        {
            return Err(ConfigError::Validation(format!(
                "theme.palette must have 16 entries, found {}",
                palette.len()
            )));
        }
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("snippet-diff")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // Use XDG convention on all platforms: ~/.config/snippet-diff/
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("snippet-diff")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Enable split layout by default.
    pub fn with_split(mut self, split: bool) -> Self {
        self.default_split = split;
        self
    }

    /// Enable folding of unchanged regions.
    pub fn with_fold(mut self, fold: bool, context_lines: usize) -> Self {
        self.fold_unchanged = fold;
        self.fold_context_lines = context_lines;
        self
    }
}
