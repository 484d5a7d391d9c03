//! Realtime status report
//!
//! Builds the `<...>` line answering a `?` query. The work coordinate
//! offset and override fields are throttled: each has a countdown that
//! skips the field while nonzero and reloads from [`RefreshCounts`] when
//! the field is sent. Busy states reload with the shorter interval.
//!
//! Sending the work coordinate offset defers an override field that is due
//! in the same frame to the following report, so the two throttled fields
//! never share a line.

use crate::frame::FrameBuilder;
use grblwire_core::constants::{AXIS_LETTERS, MM_PER_INCH, N_AXIS, TOOL_LENGTH_OFFSET_AXIS};
use grblwire_core::vector::{steps_to_mpos, AxisVector};
use grblwire_core::{
    CoolantState, ControlPins, FeatureConfiguration, GcodeState, MachineStateSnapshot,
    RefreshCounts, RunState, SettingsRecord, SpindleState, StatusReportMask, SuspendFlags,
};

/// Countdowns for the throttled status fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportThrottleCounters {
    /// Reports left before the next `WCO:` field
    pub work_offset: u8,
    /// Reports left before the next `Ov:` field
    pub overrides: u8,
}

impl ReportThrottleCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make both throttled fields due on the next report
    pub fn reset(&mut self) {
        self.work_offset = 0;
        self.overrides = 0;
    }

    /// Count down the work offset field; true when it is sent this report
    pub fn tick_work_offset(&mut self, busy: bool, refresh: &RefreshCounts) -> bool {
        if self.work_offset > 0 {
            self.work_offset -= 1;
            return false;
        }
        let interval = if busy {
            refresh.work_offset_busy
        } else {
            refresh.work_offset_idle
        };
        self.work_offset = interval.saturating_sub(1);
        self.defer_override_after_work_offset();
        true
    }

    /// Count down the override field; true when it is sent this report
    pub fn tick_overrides(&mut self, busy: bool, refresh: &RefreshCounts) -> bool {
        if self.overrides > 0 {
            self.overrides -= 1;
            return false;
        }
        let interval = if busy {
            refresh.override_busy
        } else {
            refresh.override_idle
        };
        self.overrides = interval.saturating_sub(1);
        true
    }

    /// An override field due alongside a work offset field waits one report.
    fn defer_override_after_work_offset(&mut self) {
        if self.overrides == 0 {
            self.overrides = 1;
        }
    }
}

/// State token for the run state and its suspend sub-state
pub fn state_token(state: RunState, suspend: SuspendFlags) -> &'static str {
    match state {
        RunState::Idle => "Idle",
        RunState::Cycle => "Run",
        // A hold issued to cancel a jog still reads as Jog.
        RunState::Hold if suspend.contains(SuspendFlags::JOG_CANCEL) => "Jog",
        RunState::Hold if suspend.contains(SuspendFlags::HOLD_COMPLETE) => "Hold:0",
        RunState::Hold => "Hold:1",
        RunState::Jog => "Jog",
        RunState::Homing => "Home",
        RunState::Alarm => "Alarm",
        RunState::CheckMode => "Check",
        RunState::SafetyDoor => {
            if suspend.contains(SuspendFlags::INITIATE_RESTORE) {
                "Door:3"
            } else if suspend.contains(SuspendFlags::RETRACT_COMPLETE) {
                if suspend.contains(SuspendFlags::SAFETY_DOOR_AJAR) {
                    "Door:1"
                } else {
                    "Door:0"
                }
            } else {
                "Door:2"
            }
        }
        RunState::Sleep => "Sleep",
    }
}

/// Work coordinate offset: active coordinate system plus G92, with the
/// tool length offset on its axis
pub fn work_coordinate_offset(gcode: &GcodeState) -> AxisVector {
    let mut offset = [0.0; N_AXIS];
    for (axis, value) in offset.iter_mut().enumerate() {
        *value = gcode.coord_system[axis] + gcode.coord_offset[axis];
        if axis == TOOL_LENGTH_OFFSET_AXIS {
            *value += gcode.tool_length_offset;
        }
    }
    offset
}

/// Letters for every active input pin, empty when none are
pub fn pin_letters(snapshot: &MachineStateSnapshot, features: &FeatureConfiguration) -> String {
    let pins = &snapshot.pins;
    let mut letters = String::new();
    if pins.probe {
        letters.push('P');
    }
    for (axis, letter) in AXIS_LETTERS.iter().enumerate().take(N_AXIS) {
        if pins.limit_triggered(axis) {
            letters.push(*letter);
        }
    }
    if features.safety_door_input && pins.control.contains(ControlPins::SAFETY_DOOR) {
        letters.push('D');
    }
    if pins.control.contains(ControlPins::RESET) {
        letters.push('R');
    }
    if pins.control.contains(ControlPins::FEED_HOLD) {
        letters.push('H');
    }
    if pins.control.contains(ControlPins::CYCLE_START) {
        letters.push('S');
    }
    letters
}

/// Letters for the running spindle and coolant outputs
pub fn accessory_letters(
    snapshot: &MachineStateSnapshot,
    features: &FeatureConfiguration,
) -> String {
    let mut letters = String::new();
    match snapshot.spindle_state {
        SpindleState::Cw => letters.push('S'),
        SpindleState::Ccw => letters.push('C'),
        SpindleState::Disabled => {}
    }
    if snapshot.coolant_state.contains(CoolantState::FLOOD) {
        letters.push('F');
    }
    if features.coolant_mist && snapshot.coolant_state.contains(CoolantState::MIST) {
        letters.push('M');
    }
    letters
}

/// Encoder for realtime status reports
///
/// Owns the throttle counters, so one reporter serves one controller.
#[derive(Debug, Clone, Default)]
pub struct StatusReporter {
    counters: ReportThrottleCounters,
}

impl StatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> &ReportThrottleCounters {
        &self.counters
    }

    /// Make the throttled fields due on the next report, as after a reset
    pub fn reset_counters(&mut self) {
        self.counters.reset();
    }

    /// Build one status report and advance the throttle counters
    pub fn realtime_status(
        &mut self,
        snapshot: &MachineStateSnapshot,
        settings: &SettingsRecord,
        features: &FeatureConfiguration,
    ) -> String {
        let units = settings.report_units();
        let mask = settings.report_mask();
        let busy = snapshot.state.is_busy();
        let mut frame = FrameBuilder::with_capacity(128);

        frame
            .push('<')
            .push_str(state_token(snapshot.state, snapshot.suspend));

        let mut position = steps_to_mpos(&snapshot.position, &settings.steps_per_mm);
        let report_machine = settings.reports_machine_position();
        let work_offset = if !report_machine || self.counters.work_offset == 0 {
            work_coordinate_offset(&snapshot.gcode)
        } else {
            [0.0; N_AXIS]
        };

        if report_machine {
            frame.push_str("|MPos:");
        } else {
            for (value, offset) in position.iter_mut().zip(work_offset.iter()) {
                *value -= offset;
            }
            frame.push_str("|WPos:");
        }
        frame.axis_values(&position, units);

        if features.report_buffer_state && mask.contains(StatusReportMask::BUFFER_STATE) {
            frame.push_fmt(format_args!(
                "|Bf:{},{}",
                snapshot.buffer.planner_blocks_available, snapshot.buffer.rx_bytes_available
            ));
        }

        if features.reports_line_numbers() {
            if let Some(line) = snapshot.current_line_number.filter(|n| *n > 0) {
                frame.push_fmt(format_args!("|Ln:{}", line));
            }
        }

        if features.report_feed_speed {
            let rate = snapshot.realtime_rate;
            match (features.variable_spindle, units.is_imperial()) {
                (true, false) => frame.push_fmt(format_args!(
                    "|FS:{:.0},{:.0}",
                    rate, snapshot.spindle_speed
                )),
                // Inch mode converts the rate only; the RPM goes out as is.
                // Matches upstream Grbl, not ports that divide the RPM.
                (true, true) => frame.push_fmt(format_args!(
                    "|FS:{:.1},{:.0}",
                    rate / MM_PER_INCH,
                    snapshot.spindle_speed
                )),
                (false, false) => frame.push_fmt(format_args!("|F:{:.0}", rate)),
                (false, true) => frame.push_fmt(format_args!("|F:{:.1}", rate / MM_PER_INCH)),
            };
        }

        if features.report_pin_state {
            let letters = pin_letters(snapshot, features);
            if !letters.is_empty() {
                frame.push_str("|Pn:").push_str(&letters);
            }
        }

        if features.report_work_offset
            && self.counters.tick_work_offset(busy, &features.refresh)
        {
            frame.push_str("|WCO:").axis_values(&work_offset, units);
        }

        if features.report_overrides && self.counters.tick_overrides(busy, &features.refresh) {
            let ov = &snapshot.overrides;
            frame.push_fmt(format_args!("|Ov:{},{},{}", ov.feed, ov.rapid, ov.spindle));

            let letters = accessory_letters(snapshot, features);
            if !letters.is_empty() {
                frame.push_str("|A:").push_str(&letters);
            }
        }

        tracing::trace!(
            state = %snapshot.state,
            work_offset = self.counters.work_offset,
            overrides = self.counters.overrides,
            "status report built"
        );

        frame.push('>');
        frame.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grblwire_core::PinState;

    fn metric_machine_settings() -> SettingsRecord {
        SettingsRecord {
            status_report_mask: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_state_tokens() {
        let none = SuspendFlags::empty();
        assert_eq!(state_token(RunState::Idle, none), "Idle");
        assert_eq!(state_token(RunState::Cycle, none), "Run");
        assert_eq!(state_token(RunState::Homing, none), "Home");
        assert_eq!(state_token(RunState::CheckMode, none), "Check");
        assert_eq!(state_token(RunState::Sleep, none), "Sleep");
        assert_eq!(state_token(RunState::Hold, none), "Hold:1");
        assert_eq!(
            state_token(RunState::Hold, SuspendFlags::HOLD_COMPLETE),
            "Hold:0"
        );
        assert_eq!(
            state_token(
                RunState::Hold,
                SuspendFlags::HOLD_COMPLETE | SuspendFlags::JOG_CANCEL
            ),
            "Jog"
        );
    }

    #[test]
    fn test_door_tokens() {
        assert_eq!(
            state_token(RunState::SafetyDoor, SuspendFlags::empty()),
            "Door:2"
        );
        assert_eq!(
            state_token(RunState::SafetyDoor, SuspendFlags::RETRACT_COMPLETE),
            "Door:0"
        );
        assert_eq!(
            state_token(
                RunState::SafetyDoor,
                SuspendFlags::RETRACT_COMPLETE | SuspendFlags::SAFETY_DOOR_AJAR
            ),
            "Door:1"
        );
        assert_eq!(
            state_token(
                RunState::SafetyDoor,
                SuspendFlags::INITIATE_RESTORE | SuspendFlags::RETRACT_COMPLETE
            ),
            "Door:3"
        );
    }

    #[test]
    fn test_first_report_sends_work_offset_then_overrides() {
        let mut reporter = StatusReporter::new();
        let snapshot = MachineStateSnapshot::default();
        let settings = metric_machine_settings();
        let features = FeatureConfiguration::default();

        let first = reporter.realtime_status(&snapshot, &settings, &features);
        assert_eq!(
            first,
            "<Idle|MPos:0.000,0.000,0.000|FS:0,0|WCO:0.000,0.000,0.000>\r\n"
        );

        let second = reporter.realtime_status(&snapshot, &settings, &features);
        assert_eq!(
            second,
            "<Idle|MPos:0.000,0.000,0.000|FS:0,0|Ov:100,100,100>\r\n"
        );
    }

    #[test]
    fn test_override_cadence_when_idle() {
        let mut reporter = StatusReporter::new();
        let snapshot = MachineStateSnapshot::default();
        let settings = metric_machine_settings();
        let features = FeatureConfiguration {
            report_work_offset: false,
            ..Default::default()
        };
        let interval = features.refresh.override_idle as usize;

        let emitted: Vec<usize> = (0..interval * 3)
            .filter(|_| {
                reporter
                    .realtime_status(&snapshot, &settings, &features)
                    .contains("|Ov:")
            })
            .collect();
        assert_eq!(emitted, vec![0, interval, interval * 2]);
    }

    #[test]
    fn test_busy_state_uses_busy_interval() {
        let mut counters = ReportThrottleCounters::new();
        let refresh = RefreshCounts::default();
        assert!(counters.tick_work_offset(true, &refresh));
        assert_eq!(counters.work_offset, refresh.work_offset_busy - 1);
        assert_eq!(counters.overrides, 1);
        assert!(!counters.tick_overrides(true, &refresh));
        assert!(counters.tick_overrides(true, &refresh));
        assert_eq!(counters.overrides, refresh.override_busy - 1);

        counters.reset();
        assert_eq!(counters, ReportThrottleCounters::default());
    }

    #[test]
    fn test_work_position_subtracts_offset() {
        let mut reporter = StatusReporter::new();
        let mut snapshot = MachineStateSnapshot::new(RunState::Cycle).with_position([2500, 0, 0]);
        snapshot.gcode.coord_system = [1.0, 2.0, 3.0];
        snapshot.gcode.coord_offset = [1.0, 0.0, 0.0];
        snapshot.gcode.tool_length_offset = 0.5;
        let settings = SettingsRecord {
            status_report_mask: 0,
            ..Default::default()
        };

        let report = reporter.realtime_status(&snapshot, &settings, &FeatureConfiguration::minimal());
        assert_eq!(report, "<Run|WPos:8.000,-2.000,-3.500>\r\n");
    }

    #[test]
    fn test_imperial_feed_converts_rate() {
        let mut reporter = StatusReporter::new();
        let snapshot = MachineStateSnapshot {
            realtime_rate: 254.0,
            spindle_speed: 1000.0,
            ..Default::default()
        };
        let settings = SettingsRecord {
            report_inches: true,
            ..metric_machine_settings()
        };
        let features = FeatureConfiguration {
            report_feed_speed: true,
            ..FeatureConfiguration::minimal()
        };
        let report = reporter.realtime_status(&snapshot, &settings, &features);
        assert_eq!(report, "<Idle|MPos:0.0000,0.0000,0.0000|FS:10.0,1000>\r\n");

        let features = FeatureConfiguration {
            variable_spindle: false,
            ..features
        };
        let report = reporter.realtime_status(&snapshot, &settings, &features);
        assert!(report.contains("|F:10.0>"));
    }

    #[test]
    fn test_line_number_requires_both_flags() {
        let mut reporter = StatusReporter::new();
        let snapshot = MachineStateSnapshot {
            current_line_number: Some(42),
            ..Default::default()
        };
        let settings = metric_machine_settings();

        let off = reporter.realtime_status(&snapshot, &settings, &FeatureConfiguration::minimal());
        assert!(!off.contains("|Ln:"));

        let features = FeatureConfiguration {
            use_line_numbers: true,
            report_line_numbers: true,
            ..FeatureConfiguration::minimal()
        };
        let on = reporter.realtime_status(&snapshot, &settings, &features);
        assert_eq!(on, "<Idle|MPos:0.000,0.000,0.000|Ln:42>\r\n");
    }

    #[test]
    fn test_pin_letters() {
        let snapshot = MachineStateSnapshot {
            pins: PinState {
                limits: 0b101,
                control: ControlPins::SAFETY_DOOR | ControlPins::CYCLE_START,
                probe: true,
            },
            ..Default::default()
        };
        assert_eq!(
            pin_letters(&snapshot, &FeatureConfiguration::full()),
            "PXZDS"
        );
        assert_eq!(
            pin_letters(&snapshot, &FeatureConfiguration::default()),
            "PXZS"
        );
        assert_eq!(
            pin_letters(&MachineStateSnapshot::default(), &FeatureConfiguration::full()),
            ""
        );
    }

    #[test]
    fn test_accessory_letters() {
        let snapshot = MachineStateSnapshot {
            spindle_state: SpindleState::Ccw,
            coolant_state: CoolantState::FLOOD | CoolantState::MIST,
            ..Default::default()
        };
        assert_eq!(accessory_letters(&snapshot, &FeatureConfiguration::full()), "CFM");
        assert_eq!(
            accessory_letters(&snapshot, &FeatureConfiguration::default()),
            "CF"
        );
    }

    #[test]
    fn test_buffer_state_follows_report_mask() {
        let mut reporter = StatusReporter::new();
        let snapshot = MachineStateSnapshot {
            buffer: grblwire_core::BufferState {
                planner_blocks_available: 15,
                rx_bytes_available: 128,
            },
            ..Default::default()
        };
        let settings = SettingsRecord {
            status_report_mask: 3,
            ..Default::default()
        };
        let features = FeatureConfiguration {
            report_buffer_state: true,
            ..FeatureConfiguration::minimal()
        };
        let report = reporter.realtime_status(&snapshot, &settings, &features);
        assert_eq!(report, "<Idle|MPos:0.000,0.000,0.000|Bf:15,128>\r\n");
    }

    #[test]
    fn test_report_framing_with_everything_disabled() {
        let mut reporter = StatusReporter::new();
        let report = reporter.realtime_status(
            &MachineStateSnapshot::new(RunState::Alarm),
            &metric_machine_settings(),
            &FeatureConfiguration::minimal(),
        );
        assert_eq!(report, "<Alarm|MPos:0.000,0.000,0.000>\r\n");
    }
}
