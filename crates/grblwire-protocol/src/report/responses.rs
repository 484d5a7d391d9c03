//! Response frame encoders
//!
//! One function per frame type. Each is a pure mapping from the state it
//! reads to the complete frame text, CRLF included. Delivery is left to
//! [`Reporter`](super::Reporter).

use crate::frame::FrameBuilder;
use grblwire_core::constants::{
    AXIS_N_SETTINGS, AXIS_SETTINGS_INCREMENT, AXIS_SETTINGS_START_VAL, INCH_PER_MM, MM_PER_INCH,
    N_AXIS,
};
use grblwire_core::vector::steps_to_mpos;
use grblwire_core::{
    BuildInfo, CoordinateFrame, CoordinateReadError, CoordinateStore, FeatureConfiguration,
    GcodeState, MachineStateSnapshot, OverrideControl, SettingsRecord,
};

use super::messages::FeedbackMessage;

const HELP_TEXT: &str = "[HLP:$$ $+ $# $G $I $N $x=val $Nx=line $J=line $SLP $C $X $H ~ ! ? ctrl-x]";

/// `ok` for status 0, `error:<code>` otherwise
pub fn status_message(code: u8) -> String {
    let mut frame = FrameBuilder::with_capacity(12);
    if code == 0 {
        frame.push_str("ok");
    } else {
        frame.push_fmt(format_args!("error:{}", code));
    }
    frame.finish()
}

/// `ALARM:<code>`
pub fn alarm_message(code: u8) -> String {
    let mut frame = FrameBuilder::with_capacity(12);
    frame.push_fmt(format_args!("ALARM:{}", code));
    frame.finish()
}

/// `[MSG:<text>]`
pub fn message(text: &str) -> String {
    let mut frame = FrameBuilder::with_capacity(text.len() + 8);
    frame.push_str("[MSG:").push_str(text).push(']');
    frame.finish()
}

pub fn feedback_message(msg: FeedbackMessage) -> String {
    message(msg.text())
}

/// Welcome banner sent after reset
pub fn init_message(build: &BuildInfo) -> String {
    let mut frame = FrameBuilder::new();
    frame
        .end_line()
        .push_fmt(format_args!("Grbl {} ['$' for help]", build.version));
    frame.finish()
}

pub fn help_message() -> String {
    let mut frame = FrameBuilder::new();
    frame.push_str(HELP_TEXT);
    frame.finish()
}

/// `$$` settings dump
///
/// The codes are part of the wire contract and match the storage order of
/// the settings module. Per-axis settings start at `$100` with one block of
/// [`N_AXIS`] codes every 10.
pub fn settings_dump(settings: &SettingsRecord, features: &FeatureConfiguration) -> String {
    let mut frame = FrameBuilder::with_capacity(512);

    int_setting(&mut frame, 0, settings.pulse_microseconds.into());
    int_setting(&mut frame, 1, settings.stepper_idle_lock_time.into());
    int_setting(&mut frame, 2, settings.step_invert_mask.into());
    int_setting(&mut frame, 3, settings.dir_invert_mask.into());
    int_setting(&mut frame, 4, settings.invert_step_enable.into());
    int_setting(&mut frame, 5, settings.invert_limit_pins.into());
    int_setting(&mut frame, 6, settings.invert_probe_pin.into());
    int_setting(&mut frame, 10, settings.status_report_mask.into());
    float_setting(&mut frame, 11, settings.junction_deviation);
    float_setting(&mut frame, 12, settings.arc_tolerance);
    int_setting(&mut frame, 13, settings.report_inches.into());
    int_setting(&mut frame, 20, settings.soft_limit_enable.into());
    int_setting(&mut frame, 21, settings.hard_limit_enable.into());
    int_setting(&mut frame, 22, settings.homing_enable.into());
    int_setting(&mut frame, 23, settings.homing_dir_mask.into());
    float_setting(&mut frame, 24, settings.homing_feed_rate);
    float_setting(&mut frame, 25, settings.homing_seek_rate);
    int_setting(&mut frame, 26, settings.homing_debounce_delay.into());
    float_setting(&mut frame, 27, settings.homing_pulloff);
    float_setting(&mut frame, 30, settings.rpm_max);
    float_setting(&mut frame, 31, settings.rpm_min);
    // Laser mode needs PWM spindle control; without it the setting reads 0.
    let laser_mode = features.variable_spindle && settings.laser_mode;
    int_setting(&mut frame, 32, laser_mode.into());

    let mut code = AXIS_SETTINGS_START_VAL;
    for block in 0..AXIS_N_SETTINGS {
        for axis in 0..N_AXIS {
            let value = match block {
                0 => settings.steps_per_mm[axis],
                1 => settings.max_rate[axis],
                2 => settings.acceleration[axis] / (60.0 * 60.0),
                _ => -settings.max_travel[axis],
            };
            float_setting(&mut frame, code + axis as u16, value);
        }
        code += AXIS_SETTINGS_INCREMENT;
    }

    frame.into_string()
}

fn int_setting(frame: &mut FrameBuilder, code: u16, value: u32) {
    frame.push_fmt(format_args!("${}={}", code, value)).end_line();
}

fn float_setting(frame: &mut FrameBuilder, code: u16, value: f32) {
    frame.push_fmt(format_args!("${}={:.3}", code, value)).end_line();
}

/// `[PRB:<position>:<success>]` for the last probe cycle, in machine
/// coordinates
pub fn probe_parameters(snapshot: &MachineStateSnapshot, settings: &SettingsRecord) -> String {
    let position = steps_to_mpos(&snapshot.probe_position, &settings.steps_per_mm);
    let mut frame = FrameBuilder::with_capacity(48);
    frame
        .push_str("[PRB:")
        .axis_values(&position, settings.report_units())
        .push_fmt(format_args!(":{}]", u8::from(snapshot.probe_succeeded)));
    frame.finish()
}

/// `$#` coordinate parameters: G54..G59, G28, G30, then G92 and TLO
///
/// Records are buffered, so a failed read stops the report before any
/// record reaches the host.
pub fn ngc_parameters<S: CoordinateStore + ?Sized>(
    store: &S,
    gcode: &GcodeState,
    settings: &SettingsRecord,
) -> Result<String, CoordinateReadError> {
    let units = settings.report_units();
    let mut frame = FrameBuilder::with_capacity(320);

    for coord in CoordinateFrame::ALL {
        let values = store.read_coordinate_frame(coord.index())?;
        frame
            .push_fmt(format_args!("[{}:", coord))
            .axis_values(&values, units)
            .push(']')
            .end_line();
    }

    frame
        .push_str("[G92:")
        .axis_values(&gcode.coord_offset, units)
        .push(']')
        .end_line();

    let tool_length_offset = if units.is_imperial() {
        gcode.tool_length_offset * INCH_PER_MM
    } else {
        gcode.tool_length_offset
    };
    frame.push_fmt(format_args!("[TLO:{:.3}]", tool_length_offset));

    Ok(frame.finish())
}

/// `$G` parser modal state
pub fn gcode_modes(
    snapshot: &MachineStateSnapshot,
    settings: &SettingsRecord,
    features: &FeatureConfiguration,
) -> String {
    let gc = &snapshot.gcode;
    let modal = &gc.modal;
    let mut frame = FrameBuilder::with_capacity(80);

    frame.push_fmt(format_args!(
        "[GC:G{} G{} G{} G{} G{} G{}",
        modal.motion,
        u16::from(modal.coord_select) + 54,
        modal.plane_select.gcode(),
        modal.units.gcode(),
        modal.distance.gcode(),
        modal.feed_rate.gcode(),
    ));

    if let Some(mcode) = modal.program_flow.mcode() {
        frame.push_fmt(format_args!(" M{}", mcode));
    }

    frame.push_fmt(format_args!(" M{}", modal.spindle.mcode()));

    if modal.coolant.is_off() {
        frame.push_str(" M9");
    } else if features.coolant_mist {
        if modal.coolant.mist {
            frame.push_str(" M7");
        }
        if modal.coolant.flood {
            frame.push_str(" M8");
        }
    } else {
        // Without a mist output every active coolant state is flood.
        frame.push_str(" M8");
    }

    if features.parking_override_control
        && snapshot.override_control == OverrideControl::ParkingMotion
    {
        frame.push_str(" M56");
    }

    frame.push_fmt(format_args!(" T{}", gc.tool));

    // Feed is stored in mm/min; inch reports convert it, as upstream Grbl does.
    if settings.report_inches {
        frame.push_fmt(format_args!(" F{:.1}", gc.feed_rate / MM_PER_INCH));
    } else {
        frame.push_fmt(format_args!(" F{:.0}", gc.feed_rate));
    }

    if features.variable_spindle {
        frame.push_fmt(format_args!(" S{:.3}", gc.spindle_speed));
    }

    frame.push(']');
    frame.finish()
}

/// `$N<n>=<line>` stored startup line
pub fn startup_line(index: u8, line: &str) -> String {
    let mut frame = FrameBuilder::with_capacity(line.len() + 8);
    frame.push_fmt(format_args!("$N{}={}", index, line));
    frame.finish()
}

/// `><line>:` followed by the acknowledgement for executing it
pub fn execute_startup_message(line: &str, status_code: u8) -> String {
    let mut frame = FrameBuilder::with_capacity(line.len() + 16);
    frame.push('>').push_str(line).push(':');
    let mut text = frame.into_string();
    text.push_str(&status_message(status_code));
    text
}

/// `[OPT:]` letters for the enabled build options, in firmware order
///
/// Restore, build-info-write and buffer-sync options are shown when they
/// are disabled. `W` appears once for Wi-Fi and again when WCO changes do
/// not force a buffer sync.
pub fn option_letters(features: &FeatureConfiguration) -> String {
    let opts = &features.options;
    [
        (features.variable_spindle, 'V'),
        (features.use_line_numbers, 'N'),
        (features.coolant_mist, 'M'),
        (opts.corexy, 'C'),
        (opts.parking, 'P'),
        (opts.homing_force_set_origin, 'Z'),
        (opts.homing_single_axis_commands, 'H'),
        (opts.limits_two_switches_on_axes, 'L'),
        (opts.allow_feed_override_during_probe_cycles, 'A'),
        (opts.wifi, 'W'),
        (!opts.restore_eeprom_wipe_all, '*'),
        (!opts.restore_eeprom_default_settings, '$'),
        (!opts.restore_eeprom_clear_parameters, '#'),
        (!opts.build_info_write_command, 'I'),
        (!opts.force_buffer_sync_during_eeprom_write, 'E'),
        (!opts.force_buffer_sync_during_wco_change, 'W'),
    ]
    .iter()
    .filter(|(enabled, _)| *enabled)
    .map(|(_, letter)| *letter)
    .collect()
}

/// `$I` build info: `[VER:]` with the stored build line, then `[OPT:]`
pub fn build_info(line: &str, features: &FeatureConfiguration) -> String {
    let mut frame = FrameBuilder::with_capacity(64);
    frame
        .push_fmt(format_args!(
            "[VER:{}.{}:{}]",
            features.build.version, features.build.build, line
        ))
        .end_line()
        .push_fmt(format_args!("[OPT:{}]", option_letters(features)));
    frame.finish()
}

/// `[echo: <line>]` for a line as received, after pre-parsing
pub fn echo_line_received(line: &str) -> String {
    let mut frame = FrameBuilder::with_capacity(line.len() + 10);
    frame.push_str("[echo: ").push_str(line).push(']');
    frame.finish()
}
