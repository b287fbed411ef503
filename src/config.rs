use std::path::{Path, PathBuf};

use color_eyre::{Result, eyre::Context};
use serde::{Deserialize, Serialize};

use crate::metadata_cleaning::{CleanerError, MetadataCleaner};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cleaning: CleaningConfig,
}

/// Thresholds and extra patterns for metadata cleaning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// A cleaned folder name shorter than this is not searched
    pub min_folder_length: usize,
    /// A tag value with fewer letters than this is rejected ("1. I")
    pub min_tag_letters: usize,
    /// Regexes added to the built-in garbage patterns (case-insensitive)
    pub extra_garbage_patterns: Vec<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            min_folder_length: 3,
            min_tag_letters: 2,
            extra_garbage_patterns: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents).wrap_err_with(|| {
            format!("Failed to parse config file: {}", path.display())
        })?;
        Ok(config)
    }

    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("audiobook-terms").join("config.toml"))
    }

    /// Load the config from the default path, falling back to the built-in
    /// defaults when no file exists there
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Create a default config file at the default path, if it doesn't exist.
    /// Returns the path and whether a file was written.
    pub fn create_default() -> Result<(PathBuf, bool)> {
        let path = Self::config_path()
            .ok_or_else(|| color_eyre::eyre::eyre!("No config directory available"))?;
        let written = Self::write_default_to(&path)?;
        Ok((path, written))
    }

    /// Write the default config to `path` unless a file is already there.
    /// Returns `false` when an existing file was left alone.
    pub fn write_default_to(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(&Self::default()).wrap_err("Failed to serialize config")?;
        std::fs::write(path, contents).wrap_err_with(|| {
            format!("Failed to write config file: {}", path.display())
        })?;
        Ok(true)
    }

    /// Build a metadata cleaner from the cleaning section
    pub fn cleaner(&self) -> Result<MetadataCleaner, CleanerError> {
        MetadataCleaner::new(&self.cleaning)
    }
}
