//! # Wheelwatch
//!
//! Classifies a continuous stream of two-axis wheel/trackpad delta events into
//! semantic gestures — scrolling, ghost scrolling (sub-threshold trailing-off
//! motion), and swiping (deliberate fast flicks) — and emits start/stop/edge
//! notifications per gesture per axis, plus a dynamic end-of-input delay.
//!
//! ## Quick Start
//!
//! ```
//! use wheelwatch::{AnalyzerConfig, FrameAnalyzer, InputSample};
//!
//! let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::default());
//!
//! let frame = analyzer.analyze(InputSample {
//!     delta_x: 0.0,
//!     delta_y: 5.0,
//!     timestamp: 16.0,
//! });
//!
//! assert!(frame.y.trigger.scroll_start);
//! assert!(!frame.y.swiping);
//! ```
//!
//! ## Architecture
//!
//! The system is organized into the following modules:
//!
//! - [`analysis`]: The per-event classification state machine — per-axis
//!   differential analysis with speed-up hysteresis, and cross-axis conflict
//!   resolution
//! - [`gesture`]: Notification construction and the wheelstop delay calculator
//! - [`session`]: The host-side adapter — lifecycle events, idle deadlines,
//!   and scroll-prevention policy, with no timer of its own
//! - [`workflow`]: Trace recording format, synthetic trace generation, and
//!   deterministic replay
//! - [`app`]: CLI and configuration management
//!
//! ## Event Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌───────────────┐    ┌──────────────┐    ┌────────────────┐
//! │ InputSample │───▶│ FrameAnalyzer │───▶│ FrameSample  │───▶│ GestureEmitter │
//! │ (dx, dy, t) │    │ axis+resolver │    │ (classified) │    │   (WheelSink)  │
//! └─────────────┘    └───────────────┘    └──────┬───────┘    └────────────────┘
//!                                                │
//!                                                ▼
//!                                        ┌────────────────┐
//!                                        │ WheelstopDelay │───▶ idle deadline
//!                                        └────────────────┘
//! ```
//!
//! The analyzer is single-threaded and purely reactive: one instance serves
//! exactly one event stream, and each sample is processed to completion before
//! the next. The host owns the idle timer; [`session::WheelSession`] only
//! computes deadlines and reacts when the host reports that "now" has passed
//! one.

pub mod analysis;
pub mod gesture;
pub mod session;
pub mod workflow;
pub mod app;

// Re-export commonly used types
pub use analysis::axis::{AxisState, TriggerSet};
pub use analysis::frame::{AnalyzerConfig, FrameAnalyzer, FrameSample, InputSample};
pub use gesture::emitter::{
    AxisDetail, GestureEmitter, GestureEvent, GestureKind, LifecycleEvent, LifecycleKind,
    WheelSink,
};
pub use gesture::wheelstop::{WheelstopConfig, WheelstopDelay};
pub use session::{SessionConfig, WheelSession};
pub use workflow::replay::{ReplayReport, Replayer};
pub use workflow::trace::WheelTrace;

/// Result type alias for wheelwatch
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the crate boundary.
///
/// The classification core itself never fails — every input produces a defined
/// output. Errors only arise at the edges: configuration files, trace files,
/// and replay inputs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Trace error: {0}")]
    Trace(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
