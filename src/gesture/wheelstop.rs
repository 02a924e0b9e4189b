//! Wheelstop delay calculation
//!
//! A scroll that is barely moving should get a longer grace period before the
//! host declares end-of-input. Each axis reports how far below the minimum
//! velocity it is (`delay_offset_fact`); the larger fraction scales the gap
//! between the base delay and the maximum.

use serde::{Deserialize, Serialize};

use crate::analysis::frame::FrameSample;

/// Wheelstop timing configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelstopConfig {
    /// Base idle delay after the most recent sample (milliseconds)
    pub wheelstop_delay: f64,
    /// Upper bound on the idle delay for near-stopped scrolls
    pub wheelstop_delay_max: f64,
}

impl Default for WheelstopConfig {
    fn default() -> Self {
        Self {
            wheelstop_delay: 250.0,
            wheelstop_delay_max: 500.0,
        }
    }
}

/// Derives the idle-delay extension from a classified frame.
#[derive(Debug, Clone, Copy)]
pub struct WheelstopDelay {
    delay: f64,
    max_offset: f64,
}

impl WheelstopDelay {
    /// Build from config. A `wheelstop_delay_max` below the base delay is
    /// treated as equal to it, so the offset never goes negative.
    pub fn new(config: WheelstopConfig) -> Self {
        let max = config.wheelstop_delay_max.max(config.wheelstop_delay);
        Self {
            delay: config.wheelstop_delay,
            max_offset: max - config.wheelstop_delay,
        }
    }

    /// The extra delay warranted by this frame, in `[0, max - base]`.
    pub fn extra_delay(&self, frame: &FrameSample) -> f64 {
        let offset_fact = frame.x.delay_offset_fact.max(frame.y.delay_offset_fact);
        self.max_offset * offset_fact
    }

    /// Base delay plus the frame's extension: how long after this sample the
    /// host should wait before declaring idle.
    pub fn total_delay(&self, frame: &FrameSample) -> f64 {
        self.delay + self.extra_delay(frame)
    }

    /// The configured base delay.
    pub fn base_delay(&self) -> f64 {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::axis::AxisState;

    fn frame_with_offsets(x_fact: f64, y_fact: f64) -> FrameSample {
        let mut frame = FrameSample::initial();
        frame.x.delay_offset_fact = x_fact;
        frame.y.delay_offset_fact = y_fact;
        frame
    }

    #[test]
    fn test_no_offset_means_base_delay() {
        let delay = WheelstopDelay::new(WheelstopConfig::default());
        let frame = frame_with_offsets(0.0, 0.0);
        assert_eq!(delay.extra_delay(&frame), 0.0);
        assert_eq!(delay.total_delay(&frame), 250.0);
    }

    #[test]
    fn test_dominant_axis_wins() {
        let delay = WheelstopDelay::new(WheelstopConfig::default());
        let frame = frame_with_offsets(0.2, 0.6);
        assert_eq!(delay.extra_delay(&frame), 0.6 * 250.0);
    }

    #[test]
    fn test_full_offset_reaches_max() {
        let delay = WheelstopDelay::new(WheelstopConfig::default());
        let frame = frame_with_offsets(1.0, 0.0);
        assert_eq!(delay.total_delay(&frame), 500.0);
    }

    #[test]
    fn test_extra_delay_grows_as_speed_drops() {
        // delay_offset_fact from the classifier rises toward 1 as speed
        // approaches zero; the extension must rise with it
        let delay = WheelstopDelay::new(WheelstopConfig::default());
        let slow = frame_with_offsets(0.0, 0.375);
        let slower = frame_with_offsets(0.0, 0.75);
        assert!(delay.extra_delay(&slower) > delay.extra_delay(&slow));
        assert!(delay.total_delay(&slower) < 500.0);
    }

    #[test]
    fn test_inverted_config_clamps_to_base() {
        let delay = WheelstopDelay::new(WheelstopConfig {
            wheelstop_delay: 300.0,
            wheelstop_delay_max: 100.0,
        });
        let frame = frame_with_offsets(1.0, 1.0);
        assert_eq!(delay.total_delay(&frame), 300.0);
    }

    #[test]
    fn test_classified_frame_extends_delay() {
        // End-to-end: a near-stopped scroll frame produced by the classifier
        let classifier = crate::analysis::axis::AxisClassifier {
            velocity: 1.5,
            max_fails: 3,
            wheelstop_max_velocity: 0.1,
        };
        let y = classifier.classify(1.0, &AxisState::initial(), 16.0, true);
        let frame = FrameSample {
            timestamp: 16.0,
            x: AxisState::initial(),
            y,
        };

        let delay = WheelstopDelay::new(WheelstopConfig::default());
        let expected_fact = (0.1 - 1.0 / 16.0) / 0.1;
        assert!((delay.extra_delay(&frame) - expected_fact * 250.0).abs() < 1e-9);
    }
}
