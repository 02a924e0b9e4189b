//! Cross-axis trigger resolution
//!
//! When both axes fire in the same frame, the dominant axis's gesture
//! suppresses the weaker one so only one semantic gesture is reported. The
//! resolution is a pure transform over trigger sets; the caller applies it in
//! a fixed order so the second application observes the first's effect.

use super::axis::{AxisState, TriggerSet};

/// Resolve one axis's triggers against the other axis.
///
/// Returns an all-false set when either
/// - the other axis is swiping while this axis scrolls or ghost-scrolls, or
/// - this axis scrolls while the other axis ghost-scrolls;
///
/// otherwise returns this axis's triggers unchanged. Must be applied exactly
/// twice per frame: x against the finalized y, then y against the
/// possibly-suppressed x.
pub fn resolve_against(axis: &AxisState, other: &AxisState) -> TriggerSet {
    let yields_to_swipe = other.swiping && (axis.trigger.scroll || axis.trigger.ghost_scroll);
    let yields_to_ghost = axis.trigger.scroll && other.trigger.ghost_scroll;

    if yields_to_swipe || yields_to_ghost {
        TriggerSet::default()
    } else {
        axis.trigger
    }
}
