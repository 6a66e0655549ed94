/// Longest stretch of wall time a single frame may release, so a stalled
/// tab does not replay seconds of simulation in one step.
pub const MAX_FRAME_SECONDS: f32 = 0.25;

/// Converts variable frame times in seconds into whole simulation ticks.
pub struct TickClock {
    ticks_per_second: f32,
    /// Fractional ticks carried into the next frame.
    accumulator: f32,
}

impl TickClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            ticks_per_second: ticks_per_second.max(1) as f32,
            accumulator: 0.0,
        }
    }

    /// Add frame time. Returns the number of whole ticks to simulate.
    pub fn accumulate(&mut self, frame_seconds: f32) -> u32 {
        if frame_seconds.is_nan() || frame_seconds <= 0.0 {
            return 0;
        }
        self.accumulator += frame_seconds * self.ticks_per_second;
        self.accumulator = self.accumulator.min(self.max_ticks_per_frame() as f32);
        let ticks = self.accumulator as u32;
        self.accumulator -= ticks as f32;
        ticks
    }

    /// Tick budget of one frame at this rate; never below one tick.
    pub fn max_ticks_per_frame(&self) -> u32 {
        ((MAX_FRAME_SECONDS * self.ticks_per_second) as u32).max(1)
    }

    /// Fraction of a tick carried over (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator
    }

    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second as u32
    }

    /// Duration of one tick in seconds.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.ticks_per_second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millisecond_ticks_at_60fps() {
        let mut clock = TickClock::new(1000);
        let mut total = 0;
        for _ in 0..60 {
            total += clock.accumulate(1.0 / 60.0);
        }
        assert!((999..=1000).contains(&total), "total was {}", total);
    }

    #[test]
    fn accumulates_partial() {
        let mut clock = TickClock::new(60);
        assert_eq!(clock.accumulate(0.008), 0);
        assert_eq!(clock.accumulate(0.010), 1);
    }

    #[test]
    fn caps_long_frames() {
        let mut clock = TickClock::new(1000);
        assert_eq!(clock.accumulate(5.0), 250);
        assert_eq!(clock.max_ticks_per_frame(), 250);
    }

    #[test]
    fn high_tick_rate_keeps_real_time_at_60fps() {
        let mut clock = TickClock::new(60_000);
        let mut total = 0;
        for _ in 0..60 {
            total += clock.accumulate(1.0 / 60.0);
        }
        assert!((59_990..=60_000).contains(&total), "total was {}", total);
    }

    #[test]
    fn cap_scales_with_tick_rate() {
        let mut clock = TickClock::new(60_000);
        assert_eq!(clock.accumulate(5.0), 15_000);
        assert_eq!(TickClock::new(1).max_ticks_per_frame(), 1);
    }

    #[test]
    fn ignores_non_positive_and_nan_frames() {
        let mut clock = TickClock::new(1000);
        assert_eq!(clock.accumulate(0.0), 0);
        assert_eq!(clock.accumulate(-1.0), 0);
        assert_eq!(clock.accumulate(f32::NAN), 0);
    }

    #[test]
    fn alpha_is_between_zero_and_one() {
        let mut clock = TickClock::new(60);
        clock.accumulate(0.008);
        let a = clock.alpha();
        assert!((0.0..1.0).contains(&a), "alpha was {}", a);
    }

    #[test]
    fn zero_rate_is_raised_to_one() {
        let clock = TickClock::new(0);
        assert_eq!(clock.ticks_per_second(), 1);
        assert_eq!(clock.tick_seconds(), 1.0);
    }
}
