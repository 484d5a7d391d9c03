//! Stored coordinate frames
//!
//! Work coordinate systems and the two predefined positions live in
//! persistent settings storage. The parameter report reads them through
//! [`CoordinateStore`], which may fail per frame.

use crate::constants::{N_AXIS, SETTING_INDEX_NCOORD};
use crate::error::CoordinateReadError;
use crate::vector::AxisVector;
use serde::{Deserialize, Serialize};
use std::fmt;

const FRAME_COUNT: usize = SETTING_INDEX_NCOORD as usize + 1;

/// A stored coordinate frame, in storage index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoordinateFrame {
    G54,
    G55,
    G56,
    G57,
    G58,
    G59,
    G28,
    G30,
}

impl CoordinateFrame {
    /// Every stored frame in report order
    pub const ALL: [CoordinateFrame; FRAME_COUNT] = [
        Self::G54,
        Self::G55,
        Self::G56,
        Self::G57,
        Self::G58,
        Self::G59,
        Self::G28,
        Self::G30,
    ];

    /// Storage index of this frame
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// G-code number naming this frame in reports
    pub fn gcode(self) -> u8 {
        match self {
            Self::G28 => 28,
            Self::G30 => 30,
            other => other.index() + 54,
        }
    }
}

impl fmt::Display for CoordinateFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.gcode())
    }
}

/// Read access to persistent coordinate frames
pub trait CoordinateStore {
    /// Read the frame at storage `index`
    fn read_coordinate_frame(&self, index: u8) -> Result<AxisVector, CoordinateReadError>;
}

/// Coordinate store held in memory
///
/// A frame set to `None` reads back as unreadable, which stands in for a
/// corrupted storage record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryCoordinateStore {
    frames: [Option<AxisVector>; FRAME_COUNT],
}

impl Default for InMemoryCoordinateStore {
    fn default() -> Self {
        Self {
            frames: [Some([0.0; N_AXIS]); FRAME_COUNT],
        }
    }
}

impl InMemoryCoordinateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, frame: CoordinateFrame, values: AxisVector) {
        self.frames[frame.index() as usize] = Some(values);
    }

    pub fn mark_unreadable(&mut self, frame: CoordinateFrame) {
        self.frames[frame.index() as usize] = None;
    }
}

impl CoordinateStore for InMemoryCoordinateStore {
    fn read_coordinate_frame(&self, index: u8) -> Result<AxisVector, CoordinateReadError> {
        match self.frames.get(index as usize) {
            Some(Some(values)) => Ok(*values),
            Some(None) => {
                tracing::debug!("Coordinate frame {} is unreadable", index);
                Err(CoordinateReadError::Unreadable {
                    index,
                    reason: "record marked unreadable".to_string(),
                })
            }
            None => Err(CoordinateReadError::OutOfRange { index }),
        }
    }
}
