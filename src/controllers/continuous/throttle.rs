use std::time::{Duration, Instant};

/// Lets at most one draw through per frame interval.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval: Duration,
    last_draw: Option<Instant>,
}

impl FrameThrottle {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_draw: None,
        }
    }

    /// Records a draw at `now` and returns `true` if enough time has passed
    /// since the previous one; returns `false` without recording otherwise.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_draw {
            if now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }

        self.last_draw = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last_draw = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(16);

    #[test]
    fn first_draw_always_passes() {
        let mut throttle = FrameThrottle::new(INTERVAL);
        assert!(throttle.try_acquire(Instant::now()));
    }

    #[test]
    fn draws_inside_the_interval_are_skipped() {
        let t0 = Instant::now();
        let mut throttle = FrameThrottle::new(INTERVAL);

        assert!(throttle.try_acquire(t0));
        assert!(!throttle.try_acquire(t0 + Duration::from_millis(10)));
        assert!(throttle.try_acquire(t0 + Duration::from_millis(16)));
        assert!(!throttle.try_acquire(t0 + Duration::from_millis(20)));
    }

    #[test]
    fn reset_lets_the_next_draw_through() {
        let t0 = Instant::now();
        let mut throttle = FrameThrottle::new(INTERVAL);
        throttle.try_acquire(t0);
        throttle.reset();

        assert!(throttle.try_acquire(t0));
    }
}
