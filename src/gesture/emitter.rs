//! Gesture event construction and the notification sink
//!
//! The emitter walks the fixed set of trigger kinds, builds per-axis detail
//! payloads for the axes that actually fired, and hands each completed
//! notification to the host's [`WheelSink`].

use serde::{Deserialize, Serialize};

use crate::analysis::axis::{AxisState, TriggerSet};
use crate::analysis::frame::FrameSample;

/// The seven gesture notifications, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    Scroll,
    ScrollStart,
    ScrollStop,
    GhostScroll,
    GhostScrollStart,
    GhostScrollStop,
    Swipe,
}

impl GestureKind {
    /// All kinds in the fixed emission order.
    pub const ALL: [GestureKind; 7] = [
        GestureKind::Scroll,
        GestureKind::ScrollStart,
        GestureKind::ScrollStop,
        GestureKind::GhostScroll,
        GestureKind::GhostScrollStart,
        GestureKind::GhostScrollStop,
        GestureKind::Swipe,
    ];

    /// Wire name, concatenated lowercase.
    pub fn name(self) -> &'static str {
        match self {
            GestureKind::Scroll => "scroll",
            GestureKind::ScrollStart => "scrollstart",
            GestureKind::ScrollStop => "scrollstop",
            GestureKind::GhostScroll => "ghostscroll",
            GestureKind::GhostScrollStart => "ghostscrollstart",
            GestureKind::GhostScrollStop => "ghostscrollstop",
            GestureKind::Swipe => "swipe",
        }
    }

    /// The matching flag from a trigger set.
    pub fn flag(self, trigger: &TriggerSet) -> bool {
        match self {
            GestureKind::Scroll => trigger.scroll,
            GestureKind::ScrollStart => trigger.scroll_start,
            GestureKind::ScrollStop => trigger.scroll_stop,
            GestureKind::GhostScroll => trigger.ghost_scroll,
            GestureKind::GhostScrollStart => trigger.ghost_scroll_start,
            GestureKind::GhostScrollStop => trigger.ghost_scroll_stop,
            GestureKind::Swipe => trigger.swipe,
        }
    }
}

/// Per-axis payload carried by a gesture notification.
///
/// Zeroed when the axis did not fire this kind or its delta is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDetail {
    pub delta: f64,
    pub sign: i8,
    pub speed: f64,
}

impl AxisDetail {
    /// The zero payload for a non-participating axis.
    pub fn rest() -> Self {
        Self {
            delta: 0.0,
            sign: 0,
            speed: 0.0,
        }
    }

    fn from_axis(axis: &AxisState, kind: GestureKind) -> Self {
        if kind.flag(&axis.trigger) && axis.delta != 0.0 {
            Self {
                delta: axis.delta,
                sign: axis.sign,
                speed: axis.speed,
            }
        } else {
            Self::rest()
        }
    }
}

/// One complete gesture notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    /// Which trigger fired
    pub kind: GestureKind,
    /// Prefixed wire name, e.g. `wheelscrollstart`
    pub name: String,
    pub x: AxisDetail,
    pub y: AxisDetail,
}

/// Session lifecycle transitions, owned by the host adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleKind {
    Start,
    Stop,
}

impl LifecycleKind {
    pub fn name(self) -> &'static str {
        match self {
            LifecycleKind::Start => "start",
            LifecycleKind::Stop => "stop",
        }
    }
}

/// A lifecycle notification (`<prefix>start` / `<prefix>stop`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub kind: LifecycleKind,
    /// Prefixed wire name, e.g. `wheelstop`
    pub name: String,
}

/// The notification boundary between the core and the host.
pub trait WheelSink {
    /// A gesture notification for one classified frame.
    fn gesture(&mut self, event: &GestureEvent);

    /// A session lifecycle transition.
    fn lifecycle(&mut self, event: &LifecycleEvent);
}

/// Builds notifications from classified frames.
#[derive(Debug, Clone)]
pub struct GestureEmitter {
    prefix: String,
}

impl GestureEmitter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The configured event-name prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Emit one notification per trigger kind that fired on either axis, in
    /// the fixed kind order. Returns the number of notifications handed to
    /// the sink.
    pub fn emit(&self, frame: &FrameSample, sink: &mut dyn WheelSink) -> usize {
        let mut emitted = 0;
        for kind in GestureKind::ALL {
            if kind.flag(&frame.x.trigger) || kind.flag(&frame.y.trigger) {
                let event = GestureEvent {
                    kind,
                    name: format!("{}{}", self.prefix, kind.name()),
                    x: AxisDetail::from_axis(&frame.x, kind),
                    y: AxisDetail::from_axis(&frame.y, kind),
                };
                sink.gesture(&event);
                emitted += 1;
            }
        }
        emitted
    }

    /// Build a lifecycle notification with this emitter's prefix.
    pub fn lifecycle_event(&self, kind: LifecycleKind) -> LifecycleEvent {
        LifecycleEvent {
            kind,
            name: format!("{}{}", self.prefix, kind.name()),
        }
    }
}
