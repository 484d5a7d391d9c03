//! # grblwire Core
//!
//! Core types for the grblwire controller protocol layer.
//! Provides the read-only controller snapshot the encoders consume, the
//! persistent settings record, the build-time feature configuration, and
//! the coordinate-frame storage interface.

pub mod client;
pub mod constants;
pub mod coordinates;
pub mod error;
pub mod features;
pub mod modal;
pub mod settings;
pub mod state;
pub mod status;
pub mod units;
pub mod vector;

pub use client::ClientTarget;
pub use coordinates::{CoordinateFrame, CoordinateStore, InMemoryCoordinateStore};
pub use error::{CoordinateReadError, DecodeError, Error, Result};
pub use features::{BuildInfo, BuildOptions, FeatureConfiguration, RefreshCounts};
pub use modal::{
    CoolantMode, DistanceMode, FeedRateMode, GcodeState, ModalState, MotionMode, Plane,
    ProgramFlow, SpindleMode, UnitsMode,
};
pub use settings::{SettingsRecord, StatusReportMask};
pub use state::{
    BufferState, ControlPins, CoolantState, MachineStateSnapshot, OverrideControl,
    OverrideValues, PinState, RunState, SpindleState, SuspendFlags,
};
pub use status::{AlarmCode, StatusCode};
pub use units::ReportUnits;
pub use vector::{AxisVector, StepVector};
