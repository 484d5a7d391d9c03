//! # grblwire Settings
//!
//! Loads, validates and saves the controller configuration document.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, CoordinateTable, N_STARTUP_LINE};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
