//! Frame timing
//!
//! Two logical clocks: [`FrameClock`] ticks every scheduled frame and feeds
//! the physics; [`PublishGate`] only opens when enough wall time has passed
//! to justify another HUD redraw.

use crate::consts::NOMINAL_DT;

/// Converts host timestamps (ms) into simulation dt (seconds)
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Elapsed time since the previous frame, clamped to `max_dt`
    ///
    /// The first frame after (re)arming gets a nominal 1/60 s so time spent
    /// paused or detached never reaches the integrator.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => NOMINAL_DT,
        };
        self.last_ms = Some(now_ms);
        if dt.is_finite() {
            dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        }
    }

    /// Forget the last timestamp (pause, teardown)
    pub fn disarm(&mut self) {
        self.last_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.last_ms.is_some()
    }
}

/// Minimum-interval gate for UI publication
#[derive(Debug, Clone)]
pub struct PublishGate {
    interval_ms: f64,
    last_ms: Option<f64>,
    forced: bool,
}

impl PublishGate {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
            forced: false,
        }
    }

    /// Open the gate on the next check regardless of elapsed time
    pub fn force(&mut self) {
        self.forced = true;
    }

    /// True (and resets the gate) when a publication is due at `now_ms`
    pub fn should_publish(&mut self, now_ms: f64) -> bool {
        let due = self.forced
            || match self.last_ms {
                Some(last) => now_ms - last >= self.interval_ms,
                None => true,
            };
        if due {
            self.last_ms = Some(now_ms);
            self.forced = false;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_nominal() {
        let mut clock = FrameClock::new(0.05);
        assert_eq!(clock.advance(10_000.0), NOMINAL_DT);
        assert!((clock.advance(10_016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut clock = FrameClock::new(0.05);
        clock.advance(0.0);
        assert_eq!(clock.advance(3_000.0), 0.05);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new(0.05);
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), 0.0);
    }

    #[test]
    fn test_disarm_skips_gap() {
        let mut clock = FrameClock::new(0.05);
        clock.advance(0.0);
        clock.advance(16.0);
        clock.disarm();
        assert!(!clock.is_armed());
        // A minute of pause later
        assert_eq!(clock.advance(60_016.0), NOMINAL_DT);
    }

    #[test]
    fn test_publish_gate_throttles() {
        let mut gate = PublishGate::new(100.0);
        assert!(gate.should_publish(0.0));
        assert!(!gate.should_publish(16.0));
        assert!(!gate.should_publish(99.0));
        assert!(gate.should_publish(100.0));
        assert!(!gate.should_publish(150.0));

        gate.force();
        assert!(gate.should_publish(151.0));
        assert!(!gate.should_publish(160.0));
    }
}
