//! Synthetic trace generation
//!
//! Deterministic sample streams that exercise each gesture class. Used as CLI
//! demo input, test fixtures, and bench payloads, so the same shapes are
//! observed everywhere.

use std::str::FromStr;

use crate::analysis::frame::InputSample;
use crate::workflow::trace::WheelTrace;

/// Gap between synthesized samples, matching a 60 Hz event source.
const STEP_MS: f64 = 16.0;

/// The built-in synthetic patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthPattern {
    /// Fast accelerating flick that commits a swipe, then trails off
    Flick,
    /// Steady accelerating scroll that never reaches the swipe threshold
    Glide,
    /// Near-stopped one-unit scroll that extends the wheelstop delay
    Crawl,
    /// Alternating-direction input that reverses every sample
    Jitter,
    /// Slow horizontal scroll suppressed by a simultaneous vertical flick
    TwoAxis,
}

impl SynthPattern {
    pub const ALL: [SynthPattern; 5] = [
        SynthPattern::Flick,
        SynthPattern::Glide,
        SynthPattern::Crawl,
        SynthPattern::Jitter,
        SynthPattern::TwoAxis,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SynthPattern::Flick => "flick",
            SynthPattern::Glide => "glide",
            SynthPattern::Crawl => "crawl",
            SynthPattern::Jitter => "jitter",
            SynthPattern::TwoAxis => "two-axis",
        }
    }

    fn description(self) -> &'static str {
        match self {
            SynthPattern::Flick => "accelerating flick committing one swipe, then trailing off",
            SynthPattern::Glide => "steady sub-threshold accelerating scroll",
            SynthPattern::Crawl => "one-unit crawl extending the wheelstop delay",
            SynthPattern::Jitter => "direction reversal on every sample",
            SynthPattern::TwoAxis => "horizontal scroll suppressed by a vertical flick",
        }
    }

    /// Per-sample deltas as `(delta_x, delta_y)` pairs.
    fn deltas(self) -> Vec<(f64, f64)> {
        match self {
            SynthPattern::Flick => [4.0, 12.0, 28.0, 44.0, 30.0, 14.0, 6.0, 2.0]
                .iter()
                .map(|&dy| (0.0, dy))
                .collect(),
            SynthPattern::Glide => (1..=8).map(|i| (0.0, 2.0 * i as f64)).collect(),
            SynthPattern::Crawl => std::iter::repeat((0.0, 1.0)).take(6).collect(),
            SynthPattern::Jitter => (0..6)
                .map(|i| (0.0, if i % 2 == 0 { 3.0 } else { -3.0 }))
                .collect(),
            SynthPattern::TwoAxis => [4.0, 12.0, 28.0, 44.0, 30.0, 14.0, 6.0, 2.0]
                .iter()
                .enumerate()
                .map(|(i, &dy)| (2.0 + i as f64, dy))
                .collect(),
        }
    }

    /// Build the trace for this pattern, timestamps starting at `STEP_MS`.
    pub fn generate(self) -> WheelTrace {
        let mut trace = WheelTrace::new(
            self.name().to_string(),
            Some(self.description().to_string()),
        );
        for (i, (delta_x, delta_y)) in self.deltas().into_iter().enumerate() {
            trace.push(InputSample {
                delta_x,
                delta_y,
                timestamp: STEP_MS * (i as f64 + 1.0),
            });
        }
        trace
    }
}

impl FromStr for SynthPattern {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SynthPattern::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                crate::Error::Trace(format!(
                    "unknown pattern '{}'; expected one of: {}",
                    s,
                    SynthPattern::ALL
                        .iter()
                        .map(|p| p.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}
