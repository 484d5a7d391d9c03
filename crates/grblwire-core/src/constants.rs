//! Machine-wide constants shared by every layer.

/// Number of machine axes carried in every position or offset vector.
pub const N_AXIS: usize = 3;

/// Axis letters in index order. Only the first [`N_AXIS`] are in use.
pub const AXIS_LETTERS: [char; 8] = ['X', 'Y', 'Z', 'A', 'B', 'C', 'D', 'E'];

pub const X_AXIS: usize = 0;
pub const Y_AXIS: usize = 1;
pub const Z_AXIS: usize = 2;

/// Axis that receives the tool length offset when computing work offsets.
pub const TOOL_LENGTH_OFFSET_AXIS: usize = Z_AXIS;

pub const MM_PER_INCH: f32 = 25.40;
pub const INCH_PER_MM: f32 = 0.039_370_1;

/// Number of work coordinate systems, G54 through G59.
pub const N_COORDINATE_SYSTEM: u8 = 6;

/// Index of the last stored coordinate frame (G54..G59, then G28 and G30).
pub const SETTING_INDEX_NCOORD: u8 = N_COORDINATE_SYSTEM + 1;

/// First setting code of the per-axis block.
pub const AXIS_SETTINGS_START_VAL: u16 = 100;

/// Code stride between per-axis setting blocks.
pub const AXIS_SETTINGS_INCREMENT: u16 = 10;

/// Number of per-axis setting blocks (steps/mm, max rate, accel, travel).
pub const AXIS_N_SETTINGS: u16 = 4;

pub const REPORT_OVR_REFRESH_BUSY_COUNT: u8 = 20;
pub const REPORT_OVR_REFRESH_IDLE_COUNT: u8 = 10;
pub const REPORT_WCO_REFRESH_BUSY_COUNT: u8 = 30;
pub const REPORT_WCO_REFRESH_IDLE_COUNT: u8 = 10;

pub const GRBL_VERSION: &str = "1.1f";
pub const GRBL_VERSION_BUILD: &str = "20170801";
