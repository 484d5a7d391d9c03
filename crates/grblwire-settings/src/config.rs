//! Controller configuration file
//!
//! One document holds everything the encoders read that does not change
//! while the controller runs:
//! - `features`: compiled-in capabilities, build metadata and refresh counts
//! - `settings`: the persistent `$` settings record
//! - `report`: feedback verbosity and alarm flush delay
//! - `coordinates`: stored work coordinate systems and predefined positions
//! - `startup_lines` and `build_line`: the `$N` and `$I` user strings
//!
//! Files are TOML or JSON, chosen by extension.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use grblwire_core::{
    AxisVector, CoordinateFrame, FeatureConfiguration, InMemoryCoordinateStore, SettingsRecord,
};
use grblwire_protocol::ReportConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Number of stored startup lines
pub const N_STARTUP_LINE: usize = 2;

const APP_DIR: &str = "grblwire";
const CONFIG_FILE: &str = "config.toml";

/// Stored coordinate frames, one table entry per frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateTable {
    pub g54: AxisVector,
    pub g55: AxisVector,
    pub g56: AxisVector,
    pub g57: AxisVector,
    pub g58: AxisVector,
    pub g59: AxisVector,
    pub g28: AxisVector,
    pub g30: AxisVector,
}

impl CoordinateTable {
    pub fn get(&self, frame: CoordinateFrame) -> &AxisVector {
        match frame {
            CoordinateFrame::G54 => &self.g54,
            CoordinateFrame::G55 => &self.g55,
            CoordinateFrame::G56 => &self.g56,
            CoordinateFrame::G57 => &self.g57,
            CoordinateFrame::G58 => &self.g58,
            CoordinateFrame::G59 => &self.g59,
            CoordinateFrame::G28 => &self.g28,
            CoordinateFrame::G30 => &self.g30,
        }
    }

    /// Build a coordinate store holding these frames
    pub fn to_store(&self) -> InMemoryCoordinateStore {
        let mut store = InMemoryCoordinateStore::new();
        for frame in CoordinateFrame::ALL {
            store.set(frame, *self.get(frame));
        }
        store
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub features: FeatureConfiguration,
    pub settings: SettingsRecord,
    pub report: ReportConfig,
    pub coordinates: CoordinateTable,
    pub startup_lines: Vec<String>,
    pub build_line: String,
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!(
                "No configuration at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let settings = &self.settings;

        if settings.pulse_microseconds < 3 {
            return Err(ConfigError::out_of_range(
                "settings.pulse_microseconds",
                settings.pulse_microseconds,
            ));
        }

        if settings.status_report_mask > 3 {
            return Err(ConfigError::out_of_range(
                "settings.status_report_mask",
                settings.status_report_mask,
            ));
        }

        let positive = [
            ("steps_per_mm", &settings.steps_per_mm),
            ("max_rate", &settings.max_rate),
            ("acceleration", &settings.acceleration),
        ];
        for (name, values) in positive {
            for (axis, value) in values.iter().enumerate() {
                if value.is_nan() || *value <= 0.0 {
                    return Err(ConfigError::out_of_range(
                        format!("settings.{}[{}]", name, axis),
                        value,
                    ));
                }
            }
        }

        // Travel is stored as a negative distance from home.
        for (axis, value) in settings.max_travel.iter().enumerate() {
            if value.is_nan() || *value > 0.0 {
                return Err(ConfigError::out_of_range(
                    format!("settings.max_travel[{}]", axis),
                    value,
                ));
            }
        }

        if settings.rpm_min > settings.rpm_max {
            return Err(ConfigError::out_of_range(
                "settings.rpm_min",
                settings.rpm_min,
            ));
        }

        if !self.features.refresh.is_valid() {
            return Err(ConfigError::out_of_range(
                "features.refresh",
                format!("{:?}", self.features.refresh),
            ));
        }

        if self.startup_lines.len() > N_STARTUP_LINE {
            return Err(ConfigError::TooManyStartupLines {
                max: N_STARTUP_LINE,
                found: self.startup_lines.len(),
            });
        }

        Ok(())
    }
}

/// Default configuration file location, `<config dir>/grblwire/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| SettingsError::ConfigDirectory("no config or home directory".into()))?;
    path.push(APP_DIR);
    path.push(CONFIG_FILE);
    Ok(path)
}
