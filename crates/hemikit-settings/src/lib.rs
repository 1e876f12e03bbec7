//! hemikit Settings Crate
//!
//! Loads and saves the printer profile, tracer tuning and output options
//! from JSON or TOML files.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, ConfigFormat, OutputSettings};
pub use error::{SettingsError, SettingsResult};
