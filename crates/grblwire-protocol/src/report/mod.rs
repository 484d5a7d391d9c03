//! Report encoders
//!
//! [`responses`] holds one pure encoder per frame type, [`status`] holds the
//! stateful realtime status encoder, and [`Reporter`] ties them to a
//! [`Transport`](crate::transport::Transport) with the delivery rules
//! (message verbosity, alarm flush delay, parameter report abort).

pub mod messages;
pub mod reporter;
pub mod responses;
pub mod status;

pub use messages::{FeedbackMessage, MessageLevel};
pub use reporter::{ReportConfig, Reporter};
pub use status::{ReportThrottleCounters, StatusReporter};
