//! Per-event gesture classification
//!
//! This module turns raw two-axis delta samples into classified frames using:
//! - Per-axis differential analysis with speed-up hysteresis
//! - Cross-axis suppression of conflicting simultaneous triggers
//! - A one-deep previous-frame memory

pub mod axis;
pub mod resolver;
pub mod frame;

pub use axis::{AxisClassifier, AxisState, TriggerSet};
pub use frame::{AnalyzerConfig, FrameAnalyzer, FrameSample, InputSample};
pub use resolver::resolve_against;
