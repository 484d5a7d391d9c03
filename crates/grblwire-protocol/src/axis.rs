//! Axis vector formatting
//!
//! Every frame carrying a position or offset renders it the same way: one
//! value per axis, comma separated, 3 decimals in millimeters or 4 in
//! inches.

use grblwire_core::ReportUnits;
use std::fmt::Write;

/// Append `values` to `out` as a comma-joined list in `units`
///
/// Values are millimeters; imperial output is scaled by 1/25.4.
pub fn format_axis_values(values: &[f32], units: ReportUnits, out: &mut String) {
    let scale = units.scale();
    let decimals = units.axis_decimals();
    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{:.*}", decimals, value * scale);
    }
}

/// Render `values` as a new comma-joined string
pub fn axis_values_string(values: &[f32], units: ReportUnits) -> String {
    let mut out = String::with_capacity(values.len() * 12);
    format_axis_values(values, units, &mut out);
    out
}
