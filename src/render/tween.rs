//! Count-up animation for the score dials
//!
//! [`Tween`] reproduces the fixed-tick accumulator: the distance is split into
//! `duration / tick` equal increments, each tick adds one, and the value snaps
//! to the target as soon as it reaches or passes it. [`value_at`] is the
//! elapsed-time alternative for callers driven by a frame clock instead of a
//! fixed timer.

use std::time::Duration;

/// Timing for the dial animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub duration: Duration,
    pub tick: Duration,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1500),
            tick: Duration::from_millis(20),
        }
    }
}

/// Yields the rounded display value on every tick, ending exactly on `end`.
#[derive(Debug, Clone)]
pub struct Tween {
    current: f64,
    end: f64,
    increment: f64,
    done: bool,
}

impl Tween {
    pub fn new(start: f64, end: f64, animation: Animation) -> Self {
        let steps = animation.duration.as_secs_f64() / animation.tick.as_secs_f64();
        // Zero tick or sub-tick duration: jump straight to the target
        let increment = if steps.is_finite() && steps >= 1.0 {
            (end - start) / steps
        } else {
            end - start
        };

        Self {
            current: start,
            end,
            increment,
            done: false,
        }
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }
}

impl Iterator for Tween {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.done {
            return None;
        }

        self.current += self.increment;
        let reached = if self.increment >= 0.0 {
            self.current >= self.end
        } else {
            self.current <= self.end
        };
        if reached {
            self.current = self.end;
            self.done = true;
        }

        Some(self.current.round() as i64)
    }
}

/// Linear interpolation by elapsed time, clamped to `end` once `duration` has passed.
pub fn value_at(start: f64, end: f64, duration: Duration, elapsed: Duration) -> f64 {
    if duration.is_zero() || elapsed >= duration {
        return end;
    }
    let t = elapsed.as_secs_f64() / duration.as_secs_f64();
    start + (end - start) * t
}

/// Paces the animation loop.
pub trait Ticker {
    fn wait(&mut self, interval: Duration);
}

/// Real time: sleeps between ticks.
#[derive(Debug, Default)]
pub struct SleepTicker;

impl Ticker for SleepTicker {
    fn wait(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}

/// No pacing; every tick runs back to back.
#[derive(Debug, Default)]
pub struct Immediate;

impl Ticker for Immediate {
    fn wait(&mut self, _interval: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anim(duration_ms: u64, tick_ms: u64) -> Animation {
        Animation {
            duration: Duration::from_millis(duration_ms),
            tick: Duration::from_millis(tick_ms),
        }
    }

    // ==========================================================================
    // FIXED-TICK TWEEN TESTS
    // ==========================================================================
    //
    // increment = (end - start) / (duration / tick). With 1000ms at 10ms ticks
    // there are 100 steps, so counting 0 -> 100 moves by exactly 1 per tick.
    // ==========================================================================

    #[test]
    fn test_increment_formula() {
        let t = Tween::new(0.0, 73.0, anim(1500, 20));
        assert!((t.increment() - 73.0 / 75.0).abs() < 1e-12);
    }

    #[test]
    fn test_counts_up_and_stops_on_target() {
        let frames: Vec<i64> = Tween::new(0.0, 100.0, anim(1000, 10)).collect();
        assert_eq!(frames.len(), 100);
        assert_eq!(frames[0], 1);
        assert_eq!(*frames.last().unwrap(), 100);
    }

    #[test]
    fn test_frames_never_overshoot() {
        // 7 / (100/30) does not divide evenly; the last step must snap
        let frames: Vec<i64> = Tween::new(0.0, 7.0, anim(100, 30)).collect();
        assert_eq!(*frames.last().unwrap(), 7);
        assert!(frames.iter().all(|&v| v <= 7));
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_counts_down() {
        let frames: Vec<i64> = Tween::new(50.0, 10.0, anim(400, 100)).collect();
        assert_eq!(frames, vec![40, 30, 20, 10]);
    }

    #[test]
    fn test_zero_distance_yields_target_once() {
        let frames: Vec<i64> = Tween::new(0.0, 0.0, anim(1500, 20)).collect();
        assert_eq!(frames, vec![0]);
    }

    #[test]
    fn test_degenerate_timing_jumps_to_end() {
        let zero_tick: Vec<i64> = Tween::new(0.0, 64.0, anim(1500, 0)).collect();
        assert_eq!(zero_tick, vec![64]);

        let short: Vec<i64> = Tween::new(0.0, 64.0, anim(5, 20)).collect();
        assert_eq!(short, vec![64]);
    }

    #[test]
    fn test_fractional_target_rounds_last_frame() {
        let frames: Vec<i64> = Tween::new(0.0, 72.6, anim(100, 50)).collect();
        assert_eq!(frames, vec![36, 73]);
    }

    // ==========================================================================
    // ELAPSED-TIME INTERPOLATION TESTS
    // ==========================================================================

    #[test]
    fn test_value_at_midpoint() {
        let v = value_at(0.0, 80.0, Duration::from_millis(1000), Duration::from_millis(250));
        assert!((v - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_at_clamps_after_duration() {
        let v = value_at(0.0, 80.0, Duration::from_millis(1000), Duration::from_secs(5));
        assert_eq!(v, 80.0);
        assert_eq!(value_at(10.0, 80.0, Duration::ZERO, Duration::ZERO), 80.0);
    }
}
