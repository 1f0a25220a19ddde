//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME, MAX_RADIUS, MIN_CONTOUR_AREA, MIN_RADIUS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Thresholds used when turning detected contours into node circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Radii below this are raised to it
    pub min_radius: u32,
    /// Radii above this are lowered to it
    pub max_radius: u32,
    /// Contours with a smaller area are discarded
    pub min_contour_area: f64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            min_contour_area: MIN_CONTOUR_AREA,
        }
    }
}

/// CLI output preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Application configuration.
///
/// Stored at `config.toml` in the platform config directory. Every section
/// and field is optional in the file; missing values take their defaults.
///
/// The `passive-tree` binary only acts on `[output]`. It validates and
/// prints `[scanner]`, but no command runs a scan; those thresholds are
/// read by library callers that build a [`crate::scanner::Scanner`] from
/// them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scanner thresholds
    pub scanner: ScannerConfig,
    /// Output preferences
    pub output: OutputConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// `PASSIVE_TREE_CONFIG_DIR` takes precedence when set and non-empty.
    /// Otherwise:
    /// - Linux: `~/.config/passive-tree/`
    /// - macOS: `~/Library/Application Support/passive-tree/`
    /// - Windows: `%APPDATA%\passive-tree\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - radii are non-zero
    /// - `min_radius` is not above `max_radius`
    /// - `min_contour_area` is not negative
    pub fn validate(&self) -> Result<()> {
        let scanner = &self.scanner;

        if scanner.min_radius == 0 || scanner.max_radius == 0 {
            anyhow::bail!("Scanner radii must be non-zero");
        }

        if scanner.min_radius > scanner.max_radius {
            anyhow::bail!(
                "Scanner min_radius ({}) is greater than max_radius ({})",
                scanner.min_radius,
                scanner.max_radius
            );
        }

        if scanner.min_contour_area < 0.0 {
            anyhow::bail!(
                "Scanner min_contour_area must not be negative: {}",
                scanner.min_contour_area
            );
        }

        Ok(())
    }
}
