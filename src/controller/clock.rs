/// Time handed to one frame's update, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameClock {
    /// Since the previous frame
    pub elapsed: f32,
    /// Since the simulation started, including this frame
    pub total: f32,
}

impl FrameClock {
    pub fn new(elapsed: f32, total: f32) -> Self {
        Self { elapsed, total }
    }
}

/// Accumulates wall-clock deltas into [`FrameClock`]s.
#[derive(Debug, Clone)]
pub struct SimClock {
    total: f32,
    max_step: f32,
}

impl SimClock {
    pub fn new(max_step: f32) -> Self {
        Self {
            total: 0.0,
            max_step,
        }
    }

    /// Long stalls (debugger, hidden tab) are clamped to `max_step`.
    pub fn advance(&mut self, raw_dt: f32) -> FrameClock {
        let dt = if raw_dt.is_finite() {
            raw_dt.clamp(0.0, self.max_step)
        } else {
            0.0
        };
        self.total += dt;
        FrameClock::new(dt, self.total)
    }

    pub fn total(&self) -> f32 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates_total() {
        let mut clock = SimClock::new(0.1);
        clock.advance(0.016);
        let frame = clock.advance(0.02);
        assert_eq!(frame.elapsed, 0.02);
        assert!((frame.total - 0.036).abs() < 1e-6);
    }

    #[test]
    fn test_advance_clamps_bad_steps() {
        let mut clock = SimClock::new(0.1);
        assert_eq!(clock.advance(3.0).elapsed, 0.1);
        assert_eq!(clock.advance(-1.0).elapsed, 0.0);
        assert_eq!(clock.advance(f32::NAN).elapsed, 0.0);
        assert!((clock.total() - 0.1).abs() < 1e-6);
    }
}
