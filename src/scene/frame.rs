/// Drops frames that arrive sooner than `1000 / rate` ms after the last one
/// that was processed. Skipped frames are not accumulated.
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    min_interval_ms: f64,
    previous_ms: f64,
}

impl FrameLimiter {
    pub fn new(updates_per_sec: f64) -> Self {
        Self {
            min_interval_ms: 1000.0 / updates_per_sec.max(f64::EPSILON),
            previous_ms: 0.0,
        }
    }

    pub fn min_interval_ms(&self) -> f64 {
        self.min_interval_ms
    }

    pub fn should_process(&mut self, timestamp_ms: f64) -> bool {
        if timestamp_ms - self.previous_ms < self.min_interval_ms {
            return false;
        }
        self.previous_ms = timestamp_ms;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_hertz_threshold() {
        let mut limiter = FrameLimiter::new(30.0);
        assert!((limiter.min_interval_ms() - 33.333).abs() < 1e-3);

        assert!(!limiter.should_process(16.7));
        assert!(!limiter.should_process(33.3));
        assert!(limiter.should_process(33.4));
        assert!(!limiter.should_process(50.0));
        assert!(!limiter.should_process(66.7));
        assert!(limiter.should_process(66.8));
    }

    #[test]
    fn long_gaps_do_not_accumulate() {
        let mut limiter = FrameLimiter::new(30.0);
        assert!(limiter.should_process(1_000.0));
        // a single long stall allows exactly one frame, not a burst
        assert!(!limiter.should_process(1_010.0));
        assert!(!limiter.should_process(1_020.0));
        assert!(limiter.should_process(1_040.0));
    }
}
