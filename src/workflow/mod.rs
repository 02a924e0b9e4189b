//! Traces, synthesis, and replay
//!
//! A trace is a recorded (or synthesized) stream of input samples. The
//! replayer drives a full session from a trace, simulating the host's idle
//! timer deterministically from the recorded timestamps.

pub mod trace;
pub mod synth;
pub mod replay;

pub use replay::{ReplayReport, Replayer};
pub use synth::SynthPattern;
pub use trace::{TraceMetadata, WheelTrace};
