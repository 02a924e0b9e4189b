//! Integration tests for the gesture classification pipeline
//!
//! These tests drive full sample streams through the analyzer, emitter, and
//! session adapter and check the classified output end to end.

use wheelwatch::analysis::frame::{AnalyzerConfig, FrameAnalyzer, FrameSample, InputSample};
use wheelwatch::gesture::emitter::{GestureEvent, LifecycleEvent, WheelSink};
use wheelwatch::gesture::wheelstop::{WheelstopConfig, WheelstopDelay};
use wheelwatch::session::{SessionConfig, WheelSession};

fn sample(delta_x: f64, delta_y: f64, timestamp: f64) -> InputSample {
    InputSample {
        delta_x,
        delta_y,
        timestamp,
    }
}

/// Feed y-deltas at a fixed 16 ms cadence, returning every classified frame.
fn run_y_deltas(analyzer: &mut FrameAnalyzer, deltas: &[f64]) -> Vec<FrameSample> {
    deltas
        .iter()
        .enumerate()
        .map(|(i, delta)| analyzer.analyze(sample(0.0, *delta, 16.0 * (i as f64 + 1.0))))
        .collect()
}

/// Sink recording notification names in arrival order.
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

#[test]
fn test_steady_scroll_never_swipes() {
    let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::default());
    let frames = run_y_deltas(&mut analyzer, &[5.0, 10.0, 20.0, 22.0]);

    assert!(frames[0].y.trigger.scroll_start);
    for frame in &frames {
        assert!(frame.y.trigger.scroll);
        assert!(frame.y.speed_up);
        assert!(!frame.y.swiping);
        assert!(!frame.x.trigger.any());
    }
    // Speeds stay under the 1.5 u/ms commit threshold throughout
    assert!(frames.iter().all(|f| f.y.speed < 1.5));
}

#[test]
fn test_accelerating_past_threshold_commits_swipe() {
    let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::default());
    let frames = run_y_deltas(&mut analyzer, &[5.0, 10.0, 20.0, 40.0]);

    // 40 units over 16 ms = 2.5 u/ms crosses the threshold on the last frame
    assert!(!frames[2].y.swiping);
    assert!(frames[3].y.swiping);
    assert!(frames[3].y.trigger.swipe);
    assert!(frames[3].y.trigger.scroll_stop);
    assert!(!frames[3].y.trigger.scroll);
}

#[test]
fn test_identical_deltas_freeze_state() {
    let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::default());
    let frames = run_y_deltas(&mut analyzer, &[2.0, 2.0, 2.0, 2.0, 2.0]);

    let committed = &frames[0].y;
    for frame in &frames[1..] {
        assert_eq!(frame.y.fails, committed.fails);
        assert_eq!(frame.y.speed_up, committed.speed_up);
        assert!(frame.y.trigger.scroll);
        assert!(!frame.y.trigger.scroll_start);
        assert!(!frame.y.trigger.scroll_stop);
    }
}

#[test]
fn test_hysteresis_budget_respected() {
    let config = AnalyzerConfig {
        max_fails: 2,
        ..AnalyzerConfig::default()
    };
    let mut analyzer = FrameAnalyzer::new(config);
    let frames = run_y_deltas(&mut analyzer, &[10.0, 8.0, 6.0, 4.0]);

    // Two decelerating samples held, the third (budget exhausted) commits
    assert!(frames[1].y.speed_up);
    assert_eq!(frames[1].y.fails, 1);
    assert!(frames[2].y.speed_up);
    assert_eq!(frames[2].y.fails, 2);
    assert!(!frames[3].y.speed_up);
    assert_eq!(frames[3].y.fails, 0);
    assert!(frames[3].y.trigger.ghost_scroll_start);
}

#[test]
fn test_mutual_exclusion_across_mixed_stream() {
    let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::default());
    let stream = [
        (3.0, 5.0),
        (6.0, 10.0),
        (2.0, 30.0),
        (1.0, 45.0),
        (0.0, 20.0),
        (-4.0, 8.0),
        (-8.0, 2.0),
        (-2.0, -1.0),
        (0.0, 0.0),
    ];

    for (i, (dx, dy)) in stream.iter().enumerate() {
        let frame = analyzer.analyze(sample(*dx, *dy, 16.0 * (i as f64 + 1.0)));
        for axis in [&frame.x, &frame.y] {
            if axis.swiping {
                assert!(!axis.trigger.scroll);
                assert!(!axis.trigger.ghost_scroll);
            }
            assert!(!(axis.trigger.scroll && axis.trigger.ghost_scroll));
        }
    }
}

#[test]
fn test_cross_axis_swipe_dominates() {
    let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::default());
    // x scrolls gently while y commits a swipe on the same frame
    let frame = analyzer.analyze(sample(5.0, 30.0, 16.0));

    assert!(frame.y.swiping);
    assert!(!frame.x.trigger.any());

    // The suppression holds while the swipe continues
    let next = analyzer.analyze(sample(6.0, 35.0, 32.0));
    assert!(next.y.swiping);
    assert!(!next.x.trigger.any());
}

#[test]
fn test_delay_extension_monotone_in_speed() {
    let wheelstop = WheelstopDelay::new(WheelstopConfig::default());

    let mut previous_extra = -1.0;
    // Slower and slower scrolls: the extension must strictly grow
    for delta in [1.5, 1.0, 0.5] {
        let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::default());
        let frame = analyzer.analyze(sample(0.0, delta, 16.0));
        assert!(frame.y.trigger.scroll);

        let extra = wheelstop.extra_delay(&frame);
        assert!(extra > previous_extra);
        assert!(extra < 250.0);
        previous_extra = extra;
    }

    // At or above the minimum velocity there is no extension
    let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::default());
    let fast = analyzer.analyze(sample(0.0, 2.0, 16.0));
    assert_eq!(wheelstop.extra_delay(&fast), 0.0);
}

#[test]
fn test_session_burst_idle_burst() {
    let mut session = WheelSession::new(
        AnalyzerConfig::default(),
        WheelstopConfig::default(),
        SessionConfig::default(),
        NameSink::default(),
    );

    session.handle_sample(sample(0.0, 5.0, 16.0));
    session.handle_sample(sample(0.0, 10.0, 32.0));
    assert!(session.is_active());

    // Idle window elapses
    let deadline = session.deadline().unwrap();
    assert!(session.poll(deadline));
    assert!(!session.is_active());

    // A new burst starts a fresh gesture against the initial state
    session.handle_sample(sample(0.0, 5.0, 2000.0));

    let names = &session.sink_mut().names;
    let expected_tail = ["wheelstop", "wheelscroll", "wheelscrollstart", "wheelstart"];
    assert!(names.len() >= expected_tail.len());
    assert_eq!(&names[names.len() - expected_tail.len()..], &expected_tail);

    let starts = names.iter().filter(|n| *n == "wheelstart").count();
    assert_eq!(starts, 2);
}

#[test]
fn test_session_swipe_toggle_mid_stream() {
    let mut session = WheelSession::new(
        AnalyzerConfig::default(),
        WheelstopConfig::default(),
        SessionConfig::default(),
        NameSink::default(),
    );

    session.disable_swipe();
    session.handle_sample(sample(0.0, 40.0, 16.0));
    assert!(!session.sink_mut().names.contains(&"wheelswipe".to_string()));

    // Gate re-opened: the next fast sample commits
    session.enable_swipe();
    session.handle_sample(sample(0.0, 50.0, 32.0));
    assert!(session.sink_mut().names.contains(&"wheelswipe".to_string()));
}

#[test]
fn test_ghost_scroll_on_trailing_off_input() {
    let config = AnalyzerConfig {
        max_fails: 0,
        ..AnalyzerConfig::default()
    };
    let mut analyzer = FrameAnalyzer::new(config);
    let frames = run_y_deltas(&mut analyzer, &[10.0, 8.0, 6.0]);

    assert!(frames[0].y.trigger.scroll);
    assert!(frames[1].y.trigger.ghost_scroll_start);
    assert!(frames[1].y.trigger.scroll_stop);
    assert!(frames[2].y.trigger.ghost_scroll);
    assert!(!frames[2].y.trigger.ghost_scroll_start);
}

#[test]
fn test_direction_reversals_keep_scrolling() {
    let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::default());
    let frames = run_y_deltas(&mut analyzer, &[3.0, -3.0, 3.0, -3.0]);

    // A full sign reversal commits immediately and counts as speeding up
    for frame in &frames {
        assert!(frame.y.speed_up);
        assert!(frame.y.trigger.scroll);
        assert_eq!(frame.y.fails, 0);
    }
    assert_eq!(frames[1].y.sign, -1);
    assert_eq!(frames[2].y.sign, 1);
}
