//! Configuration file handling for hemikit
//!
//! A config file carries three sections, each optional:
//! - `printer`: filament, line width, layer height, temperatures
//! - `trace`: chord tolerance and step seed of the adaptive tracer
//! - `output`: options that change the emitted file but not the toolpath
//!
//! Missing keys fall back to their defaults, so a file holding only
//! `printer.filament_diameter = 2.85` is valid. JSON and TOML are both
//! accepted; the format is picked from the file extension.

use crate::error::{SettingsError, SettingsResult};
use hemikit_core::{PrinterProfile, TraceSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the per-user config directory and file.
const APP_DIR: &str = "hemikit";
const CONFIG_FILE: &str = "config.toml";

/// On-disk config format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Output options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Write a "Generated on" line into the header. Off by default so that
    /// the same inputs always produce the same bytes.
    pub timestamp: bool,
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Printer and material settings
    pub printer: PrinterProfile,
    /// Adaptive tracer tuning
    pub trace: TraceSettings,
    /// Output options
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from text in the given format and validate it.
    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> SettingsResult<Self> {
        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str_with_format(&content, format)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise the per-user config if it exists,
    /// otherwise the defaults.
    ///
    /// An explicitly named file must exist; a missing per-user file is not
    /// an error.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match default_config_path() {
            Ok(path) if path.is_file() => Self::load_from_file(&path),
            Ok(path) => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => {
                debug!("{}, using defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.printer.validate()?;
        self.trace.validate()?;
        if self.printer.print_temperature == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "printer.print_temperature".to_string(),
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Path of the per-user config file, `<config dir>/hemikit/config.toml`.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no config directory on this platform".to_string())
    })?;
    path.push(APP_DIR);
    path.push(CONFIG_FILE);
    Ok(path)
}
