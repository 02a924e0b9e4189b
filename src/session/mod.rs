//! Host-side session adapter
//!
//! Owns everything the classification core deliberately does not: lifecycle
//! start/stop notifications, the idle ("wheelstop") deadline, the
//! scroll-prevention policy, and resetting the analyzer history after a quiet
//! period. The session never owns a real timer — the host supplies "now" and
//! calls [`WheelSession::poll`] when its own timer fires.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::frame::{AnalyzerConfig, FrameAnalyzer, FrameSample, InputSample};
use crate::gesture::emitter::{GestureEmitter, LifecycleKind, WheelSink};
use crate::gesture::wheelstop::{WheelstopConfig, WheelstopDelay};

/// Host-facing session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Prefix for all notification names
    pub event_prefix: String,
    /// Suppress the host's native scrolling for vertical wheel turns
    pub prevent_vertical_default: bool,
    /// Suppress the host's native scrolling for horizontal wheel turns
    pub prevent_horizontal_default: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            event_prefix: "wheel".to_string(),
            prevent_vertical_default: true,
            prevent_horizontal_default: true,
        }
    }
}

/// One gesture session over one input stream.
///
/// Generic over the sink so hosts can plug in event dispatchers or collectors
/// without boxing.
#[derive(Debug)]
pub struct WheelSession<S> {
    analyzer: FrameAnalyzer,
    emitter: GestureEmitter,
    wheelstop: WheelstopDelay,
    prevent_vertical: bool,
    prevent_horizontal: bool,
    sink: S,
    active: bool,
    deadline: Option<f64>,
}

impl<S: WheelSink> WheelSession<S> {
    pub fn new(
        analyzer: AnalyzerConfig,
        wheelstop: WheelstopConfig,
        session: SessionConfig,
        sink: S,
    ) -> Self {
        Self {
            analyzer: FrameAnalyzer::new(analyzer),
            emitter: GestureEmitter::new(session.event_prefix),
            wheelstop: WheelstopDelay::new(wheelstop),
            prevent_vertical: session.prevent_vertical_default,
            prevent_horizontal: session.prevent_horizontal_default,
            sink,
            active: false,
            deadline: None,
        }
    }

    /// Process one input sample: classify, notify, and rearm the idle
    /// deadline.
    ///
    /// Gesture notifications for the frame are delivered before the `start`
    /// lifecycle event on the first sample after idle, preserving the
    /// original dispatch order of wheel hosts.
    pub fn handle_sample(&mut self, sample: InputSample) -> FrameSample {
        let frame = self.analyzer.analyze(sample);
        self.emitter.emit(&frame, &mut self.sink);

        if !self.active {
            self.active = true;
            debug!(timestamp = sample.timestamp, "session started");
            let event = self.emitter.lifecycle_event(LifecycleKind::Start);
            self.sink.lifecycle(&event);
        }

        self.deadline = Some(sample.timestamp + self.wheelstop.total_delay(&frame));
        frame
    }

    /// Report the host's current time. If the idle deadline has passed,
    /// emits the `stop` lifecycle event, clears the gesture history, and
    /// returns true.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if self.active && now >= deadline => {
                debug!(deadline, "session stopped after idle");
                let event = self.emitter.lifecycle_event(LifecycleKind::Stop);
                self.sink.lifecycle(&event);
                self.analyzer.reset();
                self.active = false;
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Whether the host should suppress its native scrolling for this sample.
    ///
    /// A wheel turn counts as vertical when `|delta_x| < |delta_y|`; the
    /// matching per-axis flag (or both flags together) decides.
    pub fn should_prevent_default(&self, sample: &InputSample) -> bool {
        let turns_vertical = sample.delta_x.abs() < sample.delta_y.abs();
        (self.prevent_vertical && self.prevent_horizontal)
            || (self.prevent_vertical && turns_vertical)
            || (self.prevent_horizontal && !turns_vertical)
    }

    /// The current idle deadline, if the session is active.
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Whether a gesture stream is currently in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Allow new swipes to commit (next sample onward).
    pub fn enable_swipe(&mut self) {
        self.analyzer.enable_swipe();
    }

    /// Block new swipes from committing (next sample onward).
    pub fn disable_swipe(&mut self) {
        self.analyzer.disable_swipe();
    }

    /// Current state of the swipe gate.
    pub fn is_swipeable(&self) -> bool {
        self.analyzer.is_swipeable()
    }

    /// Mutable access to the sink, for hosts that thread state through it.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the session and return the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::emitter::{GestureEvent, LifecycleEvent};

    /// Sink that records every notification name in arrival order.
    #[derive(Default)]
    struct NameSink {
        names: Vec<String>,
    }

    impl WheelSink for NameSink {
        fn gesture(&mut self, event: &GestureEvent) {
            self.names.push(event.name.clone());
        }

        fn lifecycle(&mut self, event: &LifecycleEvent) {
            self.names.push(event.name.clone());
        }
    }

    fn session() -> WheelSession<NameSink> {
        WheelSession::new(
            AnalyzerConfig::default(),
            WheelstopConfig::default(),
            SessionConfig::default(),
            NameSink::default(),
        )
    }

    fn sample(delta_x: f64, delta_y: f64, timestamp: f64) -> InputSample {
        InputSample {
            delta_x,
            delta_y,
            timestamp,
        }
    }

    #[test]
    fn test_gestures_precede_start() {
        let mut s = session();
        s.handle_sample(sample(0.0, 5.0, 16.0));

        assert_eq!(
            s.sink_mut().names,
            vec!["wheelscroll", "wheelscrollstart", "wheelstart"]
        );
        assert!(s.is_active());
    }

    #[test]
    fn test_start_fires_once_per_burst() {
        let mut s = session();
        s.handle_sample(sample(0.0, 5.0, 16.0));
        s.handle_sample(sample(0.0, 10.0, 32.0));

        let starts = s
            .sink_mut()
            .names
            .iter()
            .filter(|n| *n == "wheelstart")
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn test_deadline_rearmed_each_sample() {
        let mut s = session();
        s.handle_sample(sample(0.0, 5.0, 16.0));
        assert_eq!(s.deadline(), Some(16.0 + 250.0));

        s.handle_sample(sample(0.0, 10.0, 32.0));
        assert_eq!(s.deadline(), Some(32.0 + 250.0));
    }

    #[test]
    fn test_slow_scroll_extends_deadline() {
        let mut s = session();
        // 1 unit / 16 ms = 0.0625 u/ms, under wheelstop_max_velocity 0.1
        s.handle_sample(sample(0.0, 1.0, 16.0));

        let fact = (0.1 - 0.0625) / 0.1;
        let expected = 16.0 + 250.0 + fact * 250.0;
        let deadline = s.deadline().unwrap();
        assert!((deadline - expected).abs() < 1e-9);
    }

    #[test]
    fn test_poll_before_deadline_is_noop() {
        let mut s = session();
        s.handle_sample(sample(0.0, 5.0, 16.0));

        assert!(!s.poll(100.0));
        assert!(s.is_active());
        assert!(s.deadline().is_some());
    }

    #[test]
    fn test_poll_past_deadline_stops_and_resets() {
        let mut s = session();
        s.handle_sample(sample(0.0, 5.0, 16.0));
        s.handle_sample(sample(0.0, 10.0, 32.0));

        assert!(s.poll(282.0));
        assert!(!s.is_active());
        assert_eq!(s.deadline(), None);
        assert_eq!(s.sink_mut().names.last().unwrap(), "wheelstop");

        // History was cleared: the same delta starts a fresh scroll
        s.sink_mut().names.clear();
        s.handle_sample(sample(0.0, 10.0, 5000.0));
        assert!(s.sink_mut().names.contains(&"wheelscrollstart".to_string()));
        assert!(s.sink_mut().names.contains(&"wheelstart".to_string()));
    }

    #[test]
    fn test_poll_idle_session_is_noop() {
        let mut s = session();
        assert!(!s.poll(1000.0));
    }

    #[test]
    fn test_prevent_default_policy() {
        let both = session();
        assert!(both.should_prevent_default(&sample(10.0, 2.0, 16.0)));
        assert!(both.should_prevent_default(&sample(2.0, 10.0, 16.0)));

        let vertical_only = WheelSession::new(
            AnalyzerConfig::default(),
            WheelstopConfig::default(),
            SessionConfig {
                prevent_horizontal_default: false,
                ..SessionConfig::default()
            },
            NameSink::default(),
        );
        assert!(vertical_only.should_prevent_default(&sample(2.0, 10.0, 16.0)));
        assert!(!vertical_only.should_prevent_default(&sample(10.0, 2.0, 16.0)));

        let horizontal_only = WheelSession::new(
            AnalyzerConfig::default(),
            WheelstopConfig::default(),
            SessionConfig {
                prevent_vertical_default: false,
                ..SessionConfig::default()
            },
            NameSink::default(),
        );
        assert!(horizontal_only.should_prevent_default(&sample(10.0, 2.0, 16.0)));
        assert!(!horizontal_only.should_prevent_default(&sample(2.0, 10.0, 16.0)));

        // Equal magnitudes count as horizontal
        assert!(horizontal_only.should_prevent_default(&sample(5.0, 5.0, 16.0)));
    }

    #[test]
    fn test_swipe_gate_passthrough() {
        let mut s = session();
        assert!(s.is_swipeable());
        s.disable_swipe();
        assert!(!s.is_swipeable());

        s.handle_sample(sample(0.0, 40.0, 16.0));
        assert!(!s.sink_mut().names.contains(&"wheelswipe".to_string()));

        s.enable_swipe();
        s.handle_sample(sample(0.0, 50.0, 32.0));
        assert!(s.sink_mut().names.contains(&"wheelswipe".to_string()));
    }
}
