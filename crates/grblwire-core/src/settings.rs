//! Persistent controller settings
//!
//! [`SettingsRecord`] holds the values the `$$` settings dump prints. It is
//! owned by configuration storage; the report layer only reads it.

use crate::constants::N_AXIS;
use crate::units::ReportUnits;
use crate::vector::AxisVector;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Runtime status report mask (`$10`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusReportMask: u8 {
        /// Report machine position instead of work position.
        const POSITION_TYPE = 0x01;
        /// Report planner and receive buffer availability.
        const BUFFER_STATE  = 0x02;
    }
}

/// Controller settings, as stored and as printed by `$$`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsRecord {
    /// $0 step pulse, microseconds
    pub pulse_microseconds: u8,
    /// $1 step idle delay, milliseconds
    pub stepper_idle_lock_time: u8,
    /// $2 step port invert mask
    pub step_invert_mask: u8,
    /// $3 direction port invert mask
    pub dir_invert_mask: u8,
    /// $4 step enable invert
    pub invert_step_enable: bool,
    /// $5 limit pins invert
    pub invert_limit_pins: bool,
    /// $6 probe pin invert
    pub invert_probe_pin: bool,
    /// $10 status report mask
    pub status_report_mask: u8,
    /// $11 junction deviation, mm
    pub junction_deviation: f32,
    /// $12 arc tolerance, mm
    pub arc_tolerance: f32,
    /// $13 report in inches
    pub report_inches: bool,
    /// $20 soft limits enable
    pub soft_limit_enable: bool,
    /// $21 hard limits enable
    pub hard_limit_enable: bool,
    /// $22 homing cycle enable
    pub homing_enable: bool,
    /// $23 homing direction invert mask
    pub homing_dir_mask: u8,
    /// $24 homing locate feed rate, mm/min
    pub homing_feed_rate: f32,
    /// $25 homing search seek rate, mm/min
    pub homing_seek_rate: f32,
    /// $26 homing switch debounce delay, milliseconds
    pub homing_debounce_delay: u16,
    /// $27 homing switch pull-off distance, mm
    pub homing_pulloff: f32,
    /// $30 maximum spindle speed, RPM
    pub rpm_max: f32,
    /// $31 minimum spindle speed, RPM
    pub rpm_min: f32,
    /// $32 laser mode enable
    pub laser_mode: bool,
    /// $100.. steps per mm
    pub steps_per_mm: AxisVector,
    /// $110.. maximum rate, mm/min
    pub max_rate: AxisVector,
    /// $120.. acceleration, stored in mm/min^2 and printed in mm/sec^2
    pub acceleration: AxisVector,
    /// $130.. maximum travel, stored as a negative distance in mm
    pub max_travel: AxisVector,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            pulse_microseconds: 10,
            stepper_idle_lock_time: 25,
            step_invert_mask: 0,
            dir_invert_mask: 0,
            invert_step_enable: false,
            invert_limit_pins: false,
            invert_probe_pin: false,
            status_report_mask: 1,
            junction_deviation: 0.01,
            arc_tolerance: 0.002,
            report_inches: false,
            soft_limit_enable: false,
            hard_limit_enable: false,
            homing_enable: false,
            homing_dir_mask: 0,
            homing_feed_rate: 25.0,
            homing_seek_rate: 500.0,
            homing_debounce_delay: 250,
            homing_pulloff: 1.0,
            rpm_max: 1000.0,
            rpm_min: 0.0,
            laser_mode: false,
            steps_per_mm: [250.0; N_AXIS],
            max_rate: [500.0; N_AXIS],
            acceleration: [10.0 * 60.0 * 60.0; N_AXIS],
            max_travel: [-200.0; N_AXIS],
        }
    }
}

impl SettingsRecord {
    /// Decoded `$10` mask; unknown bits are ignored
    pub fn report_mask(&self) -> StatusReportMask {
        StatusReportMask::from_bits_truncate(self.status_report_mask)
    }

    /// Units the reports render lengths in
    pub fn report_units(&self) -> ReportUnits {
        ReportUnits::from_report_inches(self.report_inches)
    }

    /// Whether the status report shows machine rather than work position
    pub fn reports_machine_position(&self) -> bool {
        self.report_mask().contains(StatusReportMask::POSITION_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = SettingsRecord::default();
        assert!(settings.reports_machine_position());
        assert_eq!(settings.report_units(), ReportUnits::Metric);
        assert_eq!(settings.acceleration[0], 36000.0);
    }

    #[test]
    fn test_report_mask_truncates_unknown_bits() {
        let settings = SettingsRecord {
            status_report_mask: 0xFE,
            ..Default::default()
        };
        let mask = settings.report_mask();
        assert!(mask.contains(StatusReportMask::BUFFER_STATE));
        assert!(!mask.contains(StatusReportMask::POSITION_TYPE));
        assert!(!settings.reports_machine_position());
    }
}
