//! Controller state snapshot
//!
//! [`MachineStateSnapshot`] is the read-only view the report layer encodes.
//! The controller fills it from values the stepper interrupt keeps changing,
//! so fields may be sampled at slightly different instants. Every report
//! field is meaningful on its own, and nothing here is used for control.

use crate::modal::GcodeState;
use crate::vector::StepVector;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Controller run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Alarm,
    CheckMode,
    Homing,
    /// Executing a program ("Run")
    Cycle,
    Hold,
    Jog,
    SafetyDoor,
    Sleep,
}

impl RunState {
    /// States with motion in progress or pending, which refresh the
    /// throttled report fields more often
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Self::Homing | Self::Cycle | Self::Hold | Self::Jog | Self::SafetyDoor
        )
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Alarm => write!(f, "Alarm"),
            Self::CheckMode => write!(f, "Check"),
            Self::Homing => write!(f, "Home"),
            Self::Cycle => write!(f, "Run"),
            Self::Hold => write!(f, "Hold"),
            Self::Jog => write!(f, "Jog"),
            Self::SafetyDoor => write!(f, "Door"),
            Self::Sleep => write!(f, "Sleep"),
        }
    }
}

bitflags! {
    /// Sub-state bits qualifying a Hold or Door state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SuspendFlags: u8 {
        /// Feed hold has decelerated to a stop; ready to resume.
        const HOLD_COMPLETE      = 0x01;
        /// Resume requested after a safety door event.
        const RESTART_RETRACT    = 0x02;
        /// Parking retract finished.
        const RETRACT_COMPLETE   = 0x04;
        /// Door closed; restoring spindle, coolant and position.
        const INITIATE_RESTORE   = 0x08;
        /// Restore finished.
        const RESTORE_COMPLETE   = 0x10;
        /// Safety door is currently open.
        const SAFETY_DOOR_AJAR   = 0x20;
        /// Motion cancel in progress.
        const MOTION_CANCEL      = 0x40;
        /// Jog cancel in progress; the hold is shown as a jog.
        const JOG_CANCEL         = 0x80;
    }
}

bitflags! {
    /// Control input pins currently asserted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ControlPins: u8 {
        const RESET        = 0x01;
        const FEED_HOLD    = 0x02;
        const CYCLE_START  = 0x04;
        const SAFETY_DOOR  = 0x08;
    }
}

bitflags! {
    /// Coolant outputs currently energized.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CoolantState: u8 {
        const FLOOD = 0x01;
        const MIST  = 0x02;
    }
}

impl Default for SuspendFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for ControlPins {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for CoolantState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Spindle output state as driven, not as programmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpindleState {
    #[default]
    Disabled,
    Cw,
    Ccw,
}

/// Input pin states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PinState {
    /// Limit switch bitmask, bit N set when axis N's limit is triggered
    pub limits: u8,
    pub control: ControlPins,
    pub probe: bool,
}

impl PinState {
    pub fn limit_triggered(&self, axis: usize) -> bool {
        axis < 8 && self.limits & (1 << axis) != 0
    }
}

/// Override percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideValues {
    pub feed: u8,
    pub rapid: u8,
    pub spindle: u8,
}

impl Default for OverrideValues {
    fn default() -> Self {
        Self {
            feed: 100,
            rapid: 100,
            spindle: 100,
        }
    }
}

/// Parking override control state set by M56
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideControl {
    #[default]
    Normal,
    ParkingMotion,
}

/// Free space in the planner and receive buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BufferState {
    /// Planner blocks available
    pub planner_blocks_available: u16,
    /// Serial receive buffer bytes available
    pub rx_bytes_available: u16,
}

/// Read-only view of controller state at encode time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineStateSnapshot {
    pub state: RunState,
    pub suspend: SuspendFlags,
    /// Live machine position in steps
    pub position: StepVector,
    /// Position latched by the last probe cycle, in steps
    pub probe_position: StepVector,
    pub probe_succeeded: bool,
    pub gcode: GcodeState,
    pub overrides: OverrideValues,
    pub override_control: OverrideControl,
    pub pins: PinState,
    pub spindle_state: SpindleState,
    pub coolant_state: CoolantState,
    /// Realtime feed rate from the stepper, mm/min
    pub realtime_rate: f32,
    /// Actual spindle speed, RPM
    pub spindle_speed: f32,
    pub buffer: BufferState,
    /// Line number of the block being executed, if the planner has one
    pub current_line_number: Option<u32>,
}

impl MachineStateSnapshot {
    pub fn new(state: RunState) -> Self {
        Self {
            state,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: StepVector) -> Self {
        self.position = position;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_states() {
        assert!(RunState::Cycle.is_busy());
        assert!(RunState::Hold.is_busy());
        assert!(RunState::Jog.is_busy());
        assert!(RunState::Homing.is_busy());
        assert!(RunState::SafetyDoor.is_busy());
        assert!(!RunState::Idle.is_busy());
        assert!(!RunState::Alarm.is_busy());
        assert!(!RunState::CheckMode.is_busy());
        assert!(!RunState::Sleep.is_busy());
    }

    #[test]
    fn test_pin_state() {
        let pins = PinState {
            limits: 0b101,
            control: ControlPins::empty(),
            probe: false,
        };
        assert!(pins.limit_triggered(0));
        assert!(!pins.limit_triggered(1));
        assert!(pins.limit_triggered(2));
    }

    #[test]
    fn test_snapshot_json() {
        let json = r#"{
            "state": "hold",
            "suspend": "HOLD_COMPLETE",
            "position": [800, 0, -400],
            "coolant_state": "FLOOD | MIST"
        }"#;
        let snapshot: MachineStateSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.state, RunState::Hold);
        assert!(snapshot.suspend.contains(SuspendFlags::HOLD_COMPLETE));
        assert_eq!(snapshot.position, [800, 0, -400]);
        assert_eq!(snapshot.coolant_state, CoolantState::FLOOD | CoolantState::MIST);
        assert_eq!(snapshot.overrides, OverrideValues::default());
    }
}
