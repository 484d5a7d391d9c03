//! Build capability configuration
//!
//! The firmware decides at build time which optional report fields exist.
//! Here those choices are a [`FeatureConfiguration`] value constructed once
//! at startup and shared read-only by every encoder.

use crate::constants::{
    GRBL_VERSION, GRBL_VERSION_BUILD, REPORT_OVR_REFRESH_BUSY_COUNT,
    REPORT_OVR_REFRESH_IDLE_COUNT, REPORT_WCO_REFRESH_BUSY_COUNT, REPORT_WCO_REFRESH_IDLE_COUNT,
};
use serde::{Deserialize, Serialize};

/// Status report refresh intervals for the throttled fields, in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshCounts {
    pub override_busy: u8,
    pub override_idle: u8,
    pub work_offset_busy: u8,
    pub work_offset_idle: u8,
}

impl Default for RefreshCounts {
    fn default() -> Self {
        Self {
            override_busy: REPORT_OVR_REFRESH_BUSY_COUNT,
            override_idle: REPORT_OVR_REFRESH_IDLE_COUNT,
            work_offset_busy: REPORT_WCO_REFRESH_BUSY_COUNT,
            work_offset_idle: REPORT_WCO_REFRESH_IDLE_COUNT,
        }
    }
}

impl RefreshCounts {
    /// Every interval must be at least one report
    pub fn is_valid(&self) -> bool {
        self.override_busy >= 1
            && self.override_idle >= 1
            && self.work_offset_busy >= 1
            && self.work_offset_idle >= 1
    }
}

/// Version strings reported by `[VER:]` and the welcome banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildInfo {
    pub version: String,
    pub build: String,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: GRBL_VERSION.to_string(),
            build: GRBL_VERSION_BUILD.to_string(),
        }
    }
}

/// Build options that only surface as `[OPT:]` letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub corexy: bool,
    pub parking: bool,
    pub homing_force_set_origin: bool,
    pub homing_single_axis_commands: bool,
    pub limits_two_switches_on_axes: bool,
    pub allow_feed_override_during_probe_cycles: bool,
    pub wifi: bool,
    pub restore_eeprom_wipe_all: bool,
    pub restore_eeprom_default_settings: bool,
    pub restore_eeprom_clear_parameters: bool,
    pub build_info_write_command: bool,
    pub force_buffer_sync_during_eeprom_write: bool,
    pub force_buffer_sync_during_wco_change: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            corexy: false,
            parking: false,
            homing_force_set_origin: false,
            homing_single_axis_commands: false,
            limits_two_switches_on_axes: false,
            allow_feed_override_during_probe_cycles: false,
            wifi: false,
            restore_eeprom_wipe_all: true,
            restore_eeprom_default_settings: true,
            restore_eeprom_clear_parameters: true,
            build_info_write_command: true,
            force_buffer_sync_during_eeprom_write: true,
            force_buffer_sync_during_wco_change: true,
        }
    }
}

/// Capability flags fixed for the life of a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfiguration {
    /// PWM spindle speed control; adds `S` to `[GC:]` and switches the
    /// realtime rate field from `F:` to `FS:`
    pub variable_spindle: bool,
    /// Planner blocks carry `N` line numbers
    pub use_line_numbers: bool,
    /// Mist coolant output (M7) is available
    pub coolant_mist: bool,
    /// M56 parking motion override control
    pub parking_override_control: bool,
    /// Safety door input pin is wired
    pub safety_door_input: bool,
    pub report_buffer_state: bool,
    pub report_line_numbers: bool,
    pub report_feed_speed: bool,
    pub report_pin_state: bool,
    pub report_work_offset: bool,
    pub report_overrides: bool,
    pub refresh: RefreshCounts,
    pub build: BuildInfo,
    pub options: BuildOptions,
}

impl Default for FeatureConfiguration {
    fn default() -> Self {
        Self {
            variable_spindle: true,
            use_line_numbers: false,
            coolant_mist: false,
            parking_override_control: false,
            safety_door_input: false,
            report_buffer_state: true,
            report_line_numbers: true,
            report_feed_speed: true,
            report_pin_state: true,
            report_work_offset: true,
            report_overrides: true,
            refresh: RefreshCounts::default(),
            build: BuildInfo::default(),
            options: BuildOptions::default(),
        }
    }
}

impl FeatureConfiguration {
    /// Configuration with every optional report field and capability enabled
    pub fn full() -> Self {
        Self {
            use_line_numbers: true,
            coolant_mist: true,
            parking_override_control: true,
            safety_door_input: true,
            ..Self::default()
        }
    }

    /// Configuration with no optional status report fields
    pub fn minimal() -> Self {
        Self {
            report_buffer_state: false,
            report_line_numbers: false,
            report_feed_speed: false,
            report_pin_state: false,
            report_work_offset: false,
            report_overrides: false,
            ..Self::default()
        }
    }

    /// Whether `Ln:` can ever appear in a status report
    pub fn reports_line_numbers(&self) -> bool {
        self.use_line_numbers && self.report_line_numbers
    }
}
