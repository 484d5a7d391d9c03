//! Reporting unit selection
//!
//! The controller always works internally in millimeters. Reports are
//! converted to inches when the `$13` report-inches setting is enabled.

use crate::constants::MM_PER_INCH;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Units used when rendering lengths in outgoing frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportUnits {
    /// Millimeters, 3 decimal places
    #[default]
    Metric,
    /// Inches, 4 decimal places
    Imperial,
}

impl ReportUnits {
    /// Select the report units from the report-inches flag
    pub fn from_report_inches(report_inches: bool) -> Self {
        if report_inches {
            Self::Imperial
        } else {
            Self::Metric
        }
    }

    /// Multiplier applied to a millimeter value before printing
    pub fn scale(self) -> f32 {
        match self {
            Self::Metric => 1.0,
            Self::Imperial => 1.0 / MM_PER_INCH,
        }
    }

    /// Decimal places used for axis values
    pub fn axis_decimals(self) -> usize {
        match self {
            Self::Metric => 3,
            Self::Imperial => 4,
        }
    }

    pub fn is_imperial(self) -> bool {
        self == Self::Imperial
    }
}

impl fmt::Display for ReportUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "mm"),
            Self::Imperial => write!(f, "inch"),
        }
    }
}
