//! # grblwire Protocol
//!
//! The textual wire protocol a GRBL-style controller speaks to its host:
//! - numeric field decoding for incoming command lines
//! - axis vector formatting shared by every position-bearing frame
//! - response frames (`ok`, `error:`, `ALARM:`, `[MSG:]`, `$$`, `$#`, `$G`, `$I`)
//! - the periodic `<...>` realtime status report
//!
//! Frames are handed to a [`Transport`], which routes them to the serial
//! line, the network bridge, or both.

pub mod axis;
pub mod decoder;
pub mod frame;
pub mod report;
pub mod transport;

pub use axis::{axis_values_string, format_axis_values};
pub use decoder::{read_float, NumericField, MAX_INT_DIGITS};
pub use frame::FrameBuilder;
pub use report::{
    FeedbackMessage, MessageLevel, ReportConfig, ReportThrottleCounters, Reporter, StatusReporter,
};
pub use transport::{MemoryTransport, Transport, WriterTransport};
