//! Per-axis differential classification
//!
//! The algorithmic heart of the crate: compares one axis's current delta
//! against the previous frame and decides between scrolling, ghost scrolling,
//! and swiping. Direction and speed-up changes pass through a fail-counter
//! hysteresis so a lone contrary sample cannot flip the committed state.

use serde::{Deserialize, Serialize};

/// Sign of a delta: -1, 0, or 1.
#[inline]
pub fn sign_of(value: f64) -> i8 {
    if value == 0.0 {
        0
    } else if value > 0.0 {
        1
    } else {
        -1
    }
}

/// The seven per-axis trigger flags computed each frame.
///
/// Field names use Rust casing; the wire names carried by notifications are
/// the concatenated forms (`scrollstart`, `ghostscrollstop`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSet {
    pub scroll: bool,
    pub scroll_start: bool,
    pub scroll_stop: bool,
    pub ghost_scroll: bool,
    pub ghost_scroll_start: bool,
    pub ghost_scroll_stop: bool,
    pub swipe: bool,
}

impl TriggerSet {
    /// True if any flag is set.
    pub fn any(&self) -> bool {
        self.scroll
            || self.scroll_start
            || self.scroll_stop
            || self.ghost_scroll
            || self.ghost_scroll_start
            || self.ghost_scroll_stop
            || self.swipe
    }
}

/// Classification state for one axis in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisState {
    /// Raw signed displacement for this axis this frame
    pub delta: f64,
    /// Sign of `delta`
    pub sign: i8,
    /// Whether magnitude is currently increasing in the committed direction
    pub speed_up: bool,
    /// Consecutive suppressed direction/speed-up changes. Accumulates rather
    /// than clamping, so it can transiently exceed the budget.
    pub fails: u32,
    /// `|delta| / elapsed`; infinite or NaN when elapsed is zero (see
    /// [`AxisClassifier::classify`])
    pub speed: f64,
    /// Committed swipe state
    pub swiping: bool,
    /// Trigger flags for this frame
    pub trigger: TriggerSet,
    /// Fraction in `[0, 1]` of the max extra wheelstop delay warranted by this
    /// axis this frame; nonzero only while `trigger.scroll` is set
    pub delay_offset_fact: f64,
}

impl AxisState {
    /// The at-rest state used as "previous" for the first frame after a reset.
    pub fn initial() -> Self {
        Self {
            delta: 0.0,
            sign: 0,
            speed_up: true,
            fails: 0,
            speed: 0.0,
            swiping: false,
            trigger: TriggerSet::default(),
            delay_offset_fact: 0.0,
        }
    }
}

/// Per-axis classification step.
///
/// Holds the thresholds the differential step needs; the runtime swipe gate is
/// passed per call because it can be toggled between samples.
#[derive(Debug, Clone, Copy)]
pub struct AxisClassifier {
    /// Swipe commit speed threshold (units per millisecond)
    pub velocity: f64,
    /// Hysteresis budget: how many consecutive contrary samples are suppressed
    /// before a direction/speed-up change commits
    pub max_fails: u32,
    /// Speed below which a stopping scroll extends the idle delay
    pub wheelstop_max_velocity: f64,
}

impl AxisClassifier {
    /// Classify one axis's delta against its previous state.
    ///
    /// `elapsed` is frame-global (both axes share it). When `elapsed` is zero
    /// the speed divides by zero and becomes `+inf` (nonzero delta) or `NaN`
    /// (zero delta); callers are responsible for strictly increasing
    /// timestamps, and the step deliberately does not special-case the
    /// degenerate value.
    pub fn classify(
        &self,
        delta: f64,
        prev: &AxisState,
        elapsed: f64,
        swipe_enabled: bool,
    ) -> AxisState {
        let sign = sign_of(delta);
        let unchanged = delta == prev.delta;

        let mut speed_up = prev.speed_up;
        let mut fails = prev.fails;
        let mut restart = false;
        let mut direction_change = false;

        if !unchanged {
            let sign_sum = i16::from(sign) + i16::from(prev.sign);
            direction_change = sign_sum == 0;
            let speeding_up = direction_change
                || (sign_sum > 0 && delta > prev.delta)
                || (sign_sum < 0 && delta < prev.delta);

            if !direction_change && speeding_up != prev.speed_up && prev.fails < self.max_fails {
                // hold the committed state until the contrary reading repeats
                speed_up = prev.speed_up;
                fails = prev.fails + 1;
            } else {
                speed_up = speeding_up;
                fails = 0;
                restart = !prev.speed_up && speed_up != prev.speed_up;
            }
        }

        // While swiping, a one-unit delta can precede a restart: spend the
        // whole fail budget so the next differing sample commits immediately
        // instead of re-triggering the swipe from jitter.
        if prev.swiping
            && !direction_change
            && delta * f64::from(sign) == 1.0
            && prev.delta * f64::from(prev.sign) >= 1.0
        {
            fails = self.max_fails;
        }

        let speed = delta * f64::from(sign) / elapsed;

        let swiping = (prev.swiping && !restart)
            || (swipe_enabled && speed_up && speed > self.velocity);

        let scroll = speed_up
            && !swiping
            && if unchanged { prev.trigger.scroll } else { true };
        let ghost_scroll = !speed_up
            && !swiping
            && if unchanged { prev.trigger.ghost_scroll } else { true };

        let trigger = TriggerSet {
            scroll,
            scroll_start: scroll && !prev.trigger.scroll,
            scroll_stop: !scroll && prev.trigger.scroll,
            ghost_scroll,
            ghost_scroll_start: ghost_scroll && !prev.trigger.ghost_scroll,
            ghost_scroll_stop: !ghost_scroll && prev.trigger.ghost_scroll,
            swipe: swiping && (!prev.swiping || restart),
        };

        let delay_offset_fact = if trigger.scroll && speed < self.wheelstop_max_velocity {
            (self.wheelstop_max_velocity - speed) / self.wheelstop_max_velocity
        } else {
            0.0
        };

        AxisState {
            delta,
            sign,
            speed_up,
            fails,
            speed,
            swiping,
            trigger,
            delay_offset_fact,
        }
    }
}
