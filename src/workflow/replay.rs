//! Deterministic trace replay
//!
//! Drives a full session from a trace, simulating the host's idle timer from
//! the recorded timestamps: whenever the next sample (or the end of the
//! trace) lies past the current wheelstop deadline, the stop fires at exactly
//! that deadline. Same trace, same config, same report — every time.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::frame::AnalyzerConfig;
use crate::gesture::emitter::{AxisDetail, GestureEvent, LifecycleEvent, WheelSink};
use crate::gesture::wheelstop::WheelstopConfig;
use crate::session::{SessionConfig, WheelSession};
use crate::workflow::trace::WheelTrace;

/// One replayed notification with its simulated emission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayedNotification {
    /// Simulated emission time: the sample timestamp for gestures, the idle
    /// deadline for stops
    pub at: f64,
    /// Prefixed wire name
    pub name: String,
    /// Axis payloads; absent for lifecycle notifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<AxisDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisDetail>,
}

/// Everything a replay produced, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub trace_name: String,
    pub samples_processed: usize,
    pub notifications: Vec<ReplayedNotification>,
}

impl ReplayReport {
    /// How many notifications carry the given wire name.
    pub fn count_of(&self, name: &str) -> usize {
        self.notifications.iter().filter(|n| n.name == name).count()
    }

    /// Notifications that carry axis payloads (gestures, not lifecycle).
    pub fn gesture_count(&self) -> usize {
        self.notifications.iter().filter(|n| n.x.is_some()).count()
    }

    /// Lifecycle notifications (start/stop).
    pub fn lifecycle_count(&self) -> usize {
        self.notifications.len() - self.gesture_count()
    }
}

/// Sink that stamps every notification with the replay clock.
#[derive(Debug, Default)]
struct CollectorSink {
    clock: f64,
    notifications: Vec<ReplayedNotification>,
}

impl WheelSink for CollectorSink {
    fn gesture(&mut self, event: &GestureEvent) {
        self.notifications.push(ReplayedNotification {
            at: self.clock,
            name: event.name.clone(),
            x: Some(event.x),
            y: Some(event.y),
        });
    }

    fn lifecycle(&mut self, event: &LifecycleEvent) {
        self.notifications.push(ReplayedNotification {
            at: self.clock,
            name: event.name.clone(),
            x: None,
            y: None,
        });
    }
}

/// Replays traces through a session with a simulated idle timer.
#[derive(Debug, Clone, Default)]
pub struct Replayer {
    pub analyzer: AnalyzerConfig,
    pub wheelstop: WheelstopConfig,
    pub session: SessionConfig,
}

impl Replayer {
    pub fn new(
        analyzer: AnalyzerConfig,
        wheelstop: WheelstopConfig,
        session: SessionConfig,
    ) -> Self {
        Self {
            analyzer,
            wheelstop,
            session,
        }
    }

    /// Run the whole trace. Fails only on an invalid trace (non-increasing
    /// timestamps); classification itself cannot fail.
    pub fn run(&self, trace: &WheelTrace) -> crate::Result<ReplayReport> {
        trace.validate()?;

        let mut session = WheelSession::new(
            self.analyzer,
            self.wheelstop,
            self.session.clone(),
            CollectorSink::default(),
        );

        for sample in &trace.samples {
            self.fire_elapsed_wheelstop(&mut session, sample.timestamp);
            session.sink_mut().clock = sample.timestamp;
            session.handle_sample(*sample);
        }

        // The trace is over; whatever deadline is armed will elapse
        self.fire_elapsed_wheelstop(&mut session, f64::INFINITY);

        let sink = session.into_sink();
        let report = ReplayReport {
            trace_name: trace.metadata.name.clone(),
            samples_processed: trace.samples.len(),
            notifications: sink.notifications,
        };
        info!(
            trace = %report.trace_name,
            samples = report.samples_processed,
            notifications = report.notifications.len(),
            "replay complete"
        );
        Ok(report)
    }

    /// If `now` lies past the armed deadline, deliver the stop at the
    /// deadline itself, not at `now`.
    fn fire_elapsed_wheelstop(&self, session: &mut WheelSession<CollectorSink>, now: f64) {
        if let Some(deadline) = session.deadline() {
            if now >= deadline {
                session.sink_mut().clock = deadline;
                session.poll(deadline);
            }
        }
    }
}
