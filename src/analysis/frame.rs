//! Frame-level analysis
//!
//! Orchestrates one full event: classifies both axes against the previous
//! frame, applies cross-axis resolution in both orders, and maintains the
//! short history window that supplies "previous".

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::axis::{AxisClassifier, AxisState};
use super::resolver::resolve_against;

/// How many frames the history window retains. Only the most recent entry is
/// read as "previous"; the window lets the newest fully replace the oldest.
const HISTORY_WINDOW: usize = 2;

/// One raw input sample from the host's event source.
///
/// Timestamps must be monotonic and strictly increasing for the lifetime of
/// one non-reset history, in the same time unit as the configured velocity
/// thresholds (milliseconds with the defaults).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    pub delta_x: f64,
    pub delta_y: f64,
    pub timestamp: f64,
}

/// A fully classified frame: both axis states plus the sample timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    pub timestamp: f64,
    pub x: AxisState,
    pub y: AxisState,
}

impl FrameSample {
    /// The synthesized at-rest frame used as "previous" when history is empty.
    pub fn initial() -> Self {
        Self {
            timestamp: 0.0,
            x: AxisState::initial(),
            y: AxisState::initial(),
        }
    }
}

/// Analyzer configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Swipe commit speed threshold (units per millisecond)
    pub velocity: f64,
    /// Hysteresis budget for suppressed direction/speed-up changes
    pub max_fails: u32,
    /// Speed below which a stopping scroll warrants extra idle delay;
    /// clamped to at most `velocity` at construction
    pub wheelstop_max_velocity: f64,
    /// Initial value of the runtime swipe gate
    pub swipe_enabled: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            velocity: 1.5,
            max_fails: 3,
            wheelstop_max_velocity: 0.1,
            swipe_enabled: true,
        }
    }
}

/// Per-stream frame analyzer.
///
/// Holds the only mutable state in the core: the bounded history window and
/// the runtime swipe gate. One instance must serve exactly one event stream;
/// hosts with multi-threaded delivery must serialize calls.
#[derive(Debug)]
pub struct FrameAnalyzer {
    classifier: AxisClassifier,
    swipe_enabled: bool,
    history: VecDeque<FrameSample>,
}

impl FrameAnalyzer {
    /// Create an analyzer, clamping `wheelstop_max_velocity` to `velocity`.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            classifier: AxisClassifier {
                velocity: config.velocity,
                max_fails: config.max_fails,
                wheelstop_max_velocity: config.wheelstop_max_velocity.min(config.velocity),
            },
            swipe_enabled: config.swipe_enabled,
            history: VecDeque::with_capacity(HISTORY_WINDOW),
        }
    }

    /// Analyze one sample and retain the result as the new most-recent frame.
    pub fn analyze(&mut self, sample: InputSample) -> FrameSample {
        let prev = self.previous();
        let elapsed = sample.timestamp - prev.timestamp;

        if elapsed <= 0.0 && !self.history.is_empty() {
            trace!(
                timestamp = sample.timestamp,
                previous = prev.timestamp,
                "non-increasing timestamp; speed will be infinite or NaN"
            );
        }

        if self.history.len() >= HISTORY_WINDOW {
            self.history.pop_front();
        }

        let mut x = self
            .classifier
            .classify(sample.delta_x, &prev.x, elapsed, self.swipe_enabled);
        let mut y = self
            .classifier
            .classify(sample.delta_y, &prev.y, elapsed, self.swipe_enabled);

        // x resolves against the finalized y, then y against the result
        x.trigger = resolve_against(&x, &y);
        y.trigger = resolve_against(&y, &x);

        let frame = FrameSample {
            timestamp: sample.timestamp,
            x,
            y,
        };
        self.history.push_back(frame);
        frame
    }

    /// The most recent frame, or the synthesized initial frame after a reset.
    pub fn previous(&self) -> FrameSample {
        self.history
            .back()
            .copied()
            .unwrap_or_else(FrameSample::initial)
    }

    /// Clear the history window. The next sample is analyzed against the
    /// initial at-rest state; gestures do not survive a quiet period.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Allow new swipes to commit. Takes effect on the next sample.
    pub fn enable_swipe(&mut self) {
        self.swipe_enabled = true;
    }

    /// Block new swipes from committing. Takes effect on the next sample;
    /// an already-committed swipe runs its course.
    pub fn disable_swipe(&mut self) {
        self.swipe_enabled = false;
    }

    /// Current state of the swipe gate.
    pub fn is_swipeable(&self) -> bool {
        self.swipe_enabled
    }

    /// The effective thresholds after construction-time clamping.
    pub fn classifier(&self) -> &AxisClassifier {
        &self.classifier
    }
}
