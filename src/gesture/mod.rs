//! Gesture notifications and the wheelstop delay
//!
//! Walks a classified frame's trigger flags in a fixed order, builds per-axis
//! detail payloads, and hands completed notifications to the host's sink.
//! Also derives the extra end-of-input delay for near-stopped scrolls.

pub mod emitter;
pub mod wheelstop;

pub use emitter::{
    AxisDetail, GestureEmitter, GestureEvent, GestureKind, LifecycleEvent, LifecycleKind,
    WheelSink,
};
pub use wheelstop::{WheelstopConfig, WheelstopDelay};
