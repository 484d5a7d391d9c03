//! G-code parser modal state
//!
//! Mirrors the modal groups the G-code parser keeps active between blocks.
//! The enum discriminants are the values the parser stores, which the
//! modal-state report turns back into `G`/`M` words.

use crate::vector::AxisVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Motion mode (modal group 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionMode {
    /// G0
    #[default]
    Seek,
    /// G1
    Linear,
    /// G2
    CwArc,
    /// G3
    CcwArc,
    /// G38.2
    ProbeToward,
    /// G38.3
    ProbeTowardNoError,
    /// G38.4
    ProbeAway,
    /// G38.5
    ProbeAwayNoError,
    /// G80
    None,
}

impl fmt::Display for MotionMode {
    /// Renders the G-code number without the `G` letter
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seek => write!(f, "0"),
            Self::Linear => write!(f, "1"),
            Self::CwArc => write!(f, "2"),
            Self::CcwArc => write!(f, "3"),
            Self::ProbeToward => write!(f, "38.2"),
            Self::ProbeTowardNoError => write!(f, "38.3"),
            Self::ProbeAway => write!(f, "38.4"),
            Self::ProbeAwayNoError => write!(f, "38.5"),
            Self::None => write!(f, "80"),
        }
    }
}

/// Plane selection (modal group 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    /// G17
    #[default]
    Xy,
    /// G18
    Zx,
    /// G19
    Yz,
}

impl Plane {
    pub fn gcode(self) -> u8 {
        match self {
            Self::Xy => 17,
            Self::Zx => 18,
            Self::Yz => 19,
        }
    }
}

/// Units mode (modal group 6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitsMode {
    /// G21
    #[default]
    Mm,
    /// G20
    Inches,
}

impl UnitsMode {
    pub fn gcode(self) -> u8 {
        match self {
            Self::Mm => 21,
            Self::Inches => 20,
        }
    }
}

/// Distance mode (modal group 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMode {
    /// G90
    #[default]
    Absolute,
    /// G91
    Incremental,
}

impl DistanceMode {
    pub fn gcode(self) -> u8 {
        match self {
            Self::Absolute => 90,
            Self::Incremental => 91,
        }
    }
}

/// Feed rate mode (modal group 5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedRateMode {
    /// G94
    #[default]
    UnitsPerMin,
    /// G93
    InverseTime,
}

impl FeedRateMode {
    pub fn gcode(self) -> u8 {
        match self {
            Self::UnitsPerMin => 94,
            Self::InverseTime => 93,
        }
    }
}

/// Program flow (modal group 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramFlow {
    #[default]
    Running,
    /// M0
    Paused,
    /// M1, accepted by the parser but never reported
    OptionalStop,
    /// M2
    CompletedM2,
    /// M30
    CompletedM30,
}

impl ProgramFlow {
    /// M-code reported for this flow state, if any
    pub fn mcode(self) -> Option<u8> {
        match self {
            Self::Paused => Some(0),
            Self::CompletedM2 => Some(2),
            Self::CompletedM30 => Some(30),
            Self::Running | Self::OptionalStop => None,
        }
    }
}

/// Spindle mode (modal group 7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpindleMode {
    /// M3
    Cw,
    /// M4
    Ccw,
    /// M5
    #[default]
    Disabled,
}

impl SpindleMode {
    pub fn mcode(self) -> u8 {
        match self {
            Self::Cw => 3,
            Self::Ccw => 4,
            Self::Disabled => 5,
        }
    }
}

/// Coolant mode (modal group 8); mist and flood may be active together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoolantMode {
    /// M7
    #[serde(default)]
    pub mist: bool,
    /// M8
    #[serde(default)]
    pub flood: bool,
}

impl CoolantMode {
    pub fn is_off(self) -> bool {
        !self.mist && !self.flood
    }
}

/// Active selection for every modal group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalState {
    pub motion: MotionMode,
    /// Work coordinate system index, 0 = G54 .. 5 = G59
    pub coord_select: u8,
    pub plane_select: Plane,
    pub units: UnitsMode,
    pub distance: DistanceMode,
    pub feed_rate: FeedRateMode,
    pub program_flow: ProgramFlow,
    pub spindle: SpindleMode,
    pub coolant: CoolantMode,
}

/// Parser state the reports read: modal groups plus the non-modal values
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeState {
    pub modal: ModalState,
    /// Programmed spindle speed (RPM)
    pub spindle_speed: f32,
    /// Programmed feed rate
    pub feed_rate: f32,
    pub tool: u8,
    /// Active work coordinate system origin (G54..G59), mm
    pub coord_system: AxisVector,
    /// Transient G92 offset, mm
    pub coord_offset: AxisVector,
    /// Tool length offset (G43.1), mm
    pub tool_length_offset: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_mode_numbers() {
        assert_eq!(MotionMode::Seek.to_string(), "0");
        assert_eq!(MotionMode::CcwArc.to_string(), "3");
        assert_eq!(MotionMode::ProbeToward.to_string(), "38.2");
        assert_eq!(MotionMode::ProbeAwayNoError.to_string(), "38.5");
        assert_eq!(MotionMode::None.to_string(), "80");
    }

    #[test]
    fn test_modal_group_codes() {
        assert_eq!(Plane::Zx.gcode(), 18);
        assert_eq!(UnitsMode::Inches.gcode(), 20);
        assert_eq!(DistanceMode::Incremental.gcode(), 91);
        assert_eq!(FeedRateMode::InverseTime.gcode(), 93);
        assert_eq!(SpindleMode::Disabled.mcode(), 5);
    }

    #[test]
    fn test_program_flow_reporting() {
        assert_eq!(ProgramFlow::Running.mcode(), None);
        assert_eq!(ProgramFlow::OptionalStop.mcode(), None);
        assert_eq!(ProgramFlow::Paused.mcode(), Some(0));
        assert_eq!(ProgramFlow::CompletedM30.mcode(), Some(30));
    }
}
