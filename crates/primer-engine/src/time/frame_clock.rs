use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    /// Seconds since the clock was created.
    pub elapsed: f32,
    pub frame: u64,
}

/// Measures the gap between presented frames.
///
/// The gap is clamped to a window so that a stall (dragging the window,
/// sitting in a debugger) does not fling animated objects across the canvas.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    previous: Instant,
    frames: u64,
    shortest: Duration,
    longest: Duration,
}

impl FrameClock {
    pub fn new(shortest: Duration, longest: Duration) -> Self {
        debug_assert!(shortest <= longest);
        let origin = Instant::now();
        Self {
            origin,
            previous: origin,
            frames: 0,
            shortest,
            longest,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let gap = now.saturating_duration_since(self.previous);
        self.previous = now;
        let time = FrameTime {
            dt: gap.clamp(self.shortest, self.longest).as_secs_f32(),
            elapsed: now.saturating_duration_since(self.origin).as_secs_f32(),
            frame: self.frames,
        };
        self.frames += 1;
        time
    }
}

impl Default for FrameClock {
    /// Between 100 µs and a quarter second.
    fn default() -> Self {
        Self::new(Duration::from_micros(100), Duration::from_millis(250))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_are_clamped() {
        let mut clock = FrameClock::new(Duration::from_millis(1), Duration::from_millis(50));
        let origin = clock.origin;

        let repeat = clock.tick_at(origin);
        assert!((repeat.dt - 0.001).abs() < 1e-6);

        let stall = clock.tick_at(origin + Duration::from_secs(3));
        assert!((stall.dt - 0.05).abs() < 1e-6);
        assert!((stall.elapsed - 3.0).abs() < 1e-3);
    }

    #[test]
    fn frames_are_numbered_from_zero() {
        let mut clock = FrameClock::default();
        let origin = clock.origin;
        let first = clock.tick_at(origin + Duration::from_millis(16));
        let second = clock.tick_at(origin + Duration::from_millis(32));
        assert_eq!((first.frame, second.frame), (0, 1));
        assert!((second.dt - 0.016).abs() < 1e-4);
    }
}
