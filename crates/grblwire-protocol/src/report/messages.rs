//! Feedback messages
//!
//! Out-of-band notes to the operator, sent as `[MSG:<text>]`. Each message
//! carries a verbosity level; messages above the configured level are not
//! sent at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message verbosity, lowest first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    None = 0,
    Error = 1,
    Warning = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Verbose = 5,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

/// Fixed feedback messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackMessage {
    CriticalEvent,
    AlarmLock,
    AlarmUnlock,
    Enabled,
    Disabled,
    SafetyDoorAjar,
    CheckLimits,
    ProgramEnd,
    RestoreDefaults,
    SpindleRestore,
    SleepMode,
}

impl FeedbackMessage {
    pub fn text(self) -> &'static str {
        match self {
            Self::CriticalEvent => "Reset to continue",
            Self::AlarmLock => "'$H'|'$X' to unlock",
            Self::AlarmUnlock => "Caution: Unlocked",
            Self::Enabled => "Enabled",
            Self::Disabled => "Disabled",
            Self::SafetyDoorAjar => "Check door",
            Self::CheckLimits => "Check limits",
            Self::ProgramEnd => "Program End",
            Self::RestoreDefaults => "Restoring defaults",
            Self::SpindleRestore => "Restoring spindle",
            Self::SleepMode => "Sleeping",
        }
    }

    pub fn level(self) -> MessageLevel {
        MessageLevel::Info
    }
}

impl fmt::Display for FeedbackMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
