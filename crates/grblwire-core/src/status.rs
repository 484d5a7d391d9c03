//! Status and alarm code tables
//!
//! The numeric values are the wire contract: they appear verbatim in
//! `error:<code>` and `ALARM:<code>` frames and must never be renumbered.

use std::fmt;

/// Result of executing one command line, reported as `ok` or `error:<code>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StatusCode {
    Ok = 0,
    ExpectedCommandLetter = 1,
    BadNumberFormat = 2,
    InvalidStatement = 3,
    NegativeValue = 4,
    SettingDisabled = 5,
    SettingStepPulseMin = 6,
    SettingReadFail = 7,
    IdleError = 8,
    SystemGcLock = 9,
    SoftLimitError = 10,
    Overflow = 11,
    MaxStepRateExceeded = 12,
    CheckDoor = 13,
    LineLengthExceeded = 14,
    TravelExceeded = 15,
    InvalidJogCommand = 16,
    SettingDisabledLaser = 17,
    GcodeUnsupportedCommand = 20,
    GcodeModalGroupViolation = 21,
    GcodeUndefinedFeedRate = 22,
    GcodeCommandValueNotInteger = 23,
    GcodeAxisCommandConflict = 24,
    GcodeWordRepeated = 25,
    GcodeNoAxisWords = 26,
    GcodeInvalidLineNumber = 27,
    GcodeValueWordMissing = 28,
    GcodeUnsupportedCoordSys = 29,
    GcodeG53InvalidMotionMode = 30,
    GcodeAxisWordsExist = 31,
    GcodeNoAxisWordsInPlane = 32,
    GcodeInvalidTarget = 33,
    GcodeArcRadiusError = 34,
    GcodeNoOffsetsInPlane = 35,
    GcodeUnusedWords = 36,
    GcodeG43DynamicAxisError = 37,
    GcodeMaxValueExceeded = 38,
}

impl StatusCode {
    const ALL: [StatusCode; 37] = [
        Self::Ok,
        Self::ExpectedCommandLetter,
        Self::BadNumberFormat,
        Self::InvalidStatement,
        Self::NegativeValue,
        Self::SettingDisabled,
        Self::SettingStepPulseMin,
        Self::SettingReadFail,
        Self::IdleError,
        Self::SystemGcLock,
        Self::SoftLimitError,
        Self::Overflow,
        Self::MaxStepRateExceeded,
        Self::CheckDoor,
        Self::LineLengthExceeded,
        Self::TravelExceeded,
        Self::InvalidJogCommand,
        Self::SettingDisabledLaser,
        Self::GcodeUnsupportedCommand,
        Self::GcodeModalGroupViolation,
        Self::GcodeUndefinedFeedRate,
        Self::GcodeCommandValueNotInteger,
        Self::GcodeAxisCommandConflict,
        Self::GcodeWordRepeated,
        Self::GcodeNoAxisWords,
        Self::GcodeInvalidLineNumber,
        Self::GcodeValueWordMissing,
        Self::GcodeUnsupportedCoordSys,
        Self::GcodeG53InvalidMotionMode,
        Self::GcodeAxisWordsExist,
        Self::GcodeNoAxisWordsInPlane,
        Self::GcodeInvalidTarget,
        Self::GcodeArcRadiusError,
        Self::GcodeNoOffsetsInPlane,
        Self::GcodeUnusedWords,
        Self::GcodeG43DynamicAxisError,
        Self::GcodeMaxValueExceeded,
    ];

    /// Numeric wire value
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a status code by its wire value
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    /// Short human-readable description
    pub fn description(self) -> &'static str {
        match self {
            Self::Ok => "Command accepted",
            Self::ExpectedCommandLetter => "G-code word letter was not found",
            Self::BadNumberFormat => "Numeric value format is not valid or missing",
            Self::InvalidStatement => "'$' system command was not recognized",
            Self::NegativeValue => "Negative value received for a positive value",
            Self::SettingDisabled => "Homing cycle is not enabled via settings",
            Self::SettingStepPulseMin => "Minimum step pulse time must be greater than 3us",
            Self::SettingReadFail => "Stored settings read failed",
            Self::IdleError => "'$' command cannot be used unless idle",
            Self::SystemGcLock => "G-code locked out during alarm or jog state",
            Self::SoftLimitError => "Soft limits cannot be enabled without homing",
            Self::Overflow => "Max characters per line exceeded",
            Self::MaxStepRateExceeded => "Setting value exceeds the maximum step rate",
            Self::CheckDoor => "Safety door detected as opened",
            Self::LineLengthExceeded => "Build info or startup line exceeded length limit",
            Self::TravelExceeded => "Jog target exceeds machine travel",
            Self::InvalidJogCommand => "Jog command has no '=' or contains prohibited g-code",
            Self::SettingDisabledLaser => "Laser mode requires PWM output",
            Self::GcodeUnsupportedCommand => "Unsupported or invalid g-code command",
            Self::GcodeModalGroupViolation => "More than one command from the same modal group",
            Self::GcodeUndefinedFeedRate => "Feed rate has not yet been set",
            Self::GcodeCommandValueNotInteger => "Command requires an integer value",
            Self::GcodeAxisCommandConflict => "Two commands both require axis words",
            Self::GcodeWordRepeated => "A g-code word was repeated in the block",
            Self::GcodeNoAxisWords => "Command requires axis words but none were found",
            Self::GcodeInvalidLineNumber => "Line number is not within 1 - 9,999,999",
            Self::GcodeValueWordMissing => "Required P or L value word is missing",
            Self::GcodeUnsupportedCoordSys => "Only G54-G59 work coordinate systems are supported",
            Self::GcodeG53InvalidMotionMode => "G53 requires G0 or G1 motion mode",
            Self::GcodeAxisWordsExist => "Unused axis words with G80 motion cancel active",
            Self::GcodeNoAxisWordsInPlane => "Arc has no axis words in the selected plane",
            Self::GcodeInvalidTarget => "Motion command has an invalid target",
            Self::GcodeArcRadiusError => "Arc radius definition has a geometry error",
            Self::GcodeNoOffsetsInPlane => "Arc offset word missing in the selected plane",
            Self::GcodeUnusedWords => "Unused, leftover g-code words in the block",
            Self::GcodeG43DynamicAxisError => "G43.1 offset applied to a non-tool axis",
            Self::GcodeMaxValueExceeded => "Value exceeds the maximum supported",
        }
    }
}

impl From<StatusCode> for u8 {
    fn from(status: StatusCode) -> Self {
        status.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Alarm raised by the controller, reported as `ALARM:<code>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlarmCode {
    HardLimit = 1,
    SoftLimit = 2,
    AbortCycle = 3,
    ProbeFailInitial = 4,
    ProbeFailContact = 5,
    HomingFailReset = 6,
    HomingFailDoor = 7,
    HomingFailPulloff = 8,
    HomingFailApproach = 9,
}

impl AlarmCode {
    /// Numeric wire value
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up an alarm by its wire value
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::HardLimit),
            2 => Some(Self::SoftLimit),
            3 => Some(Self::AbortCycle),
            4 => Some(Self::ProbeFailInitial),
            5 => Some(Self::ProbeFailContact),
            6 => Some(Self::HomingFailReset),
            7 => Some(Self::HomingFailDoor),
            8 => Some(Self::HomingFailPulloff),
            9 => Some(Self::HomingFailApproach),
            _ => None,
        }
    }

    /// Short human-readable description
    pub fn description(self) -> &'static str {
        match self {
            Self::HardLimit => "Hard limit triggered",
            Self::SoftLimit => "Soft limit exceeded",
            Self::AbortCycle => "Reset while in motion",
            Self::ProbeFailInitial => "Probe not in expected initial state",
            Self::ProbeFailContact => "Probe did not contact the workpiece",
            Self::HomingFailReset => "Reset during active homing cycle",
            Self::HomingFailDoor => "Safety door opened during homing cycle",
            Self::HomingFailPulloff => "Homing failed to clear limit switch",
            Self::HomingFailApproach => "Homing could not find limit switch",
        }
    }
}

impl From<AlarmCode> for u8 {
    fn from(alarm: AlarmCode) -> Self {
        alarm.code()
    }
}

impl fmt::Display for AlarmCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
