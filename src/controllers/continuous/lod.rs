use std::time::{Duration, Instant};

use log::debug;

use crate::controllers::continuous::debounce::Debouncer;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LodState {
    /// Not started yet.
    Idle,
    /// Input arrived within the settle delay; draw cheaply.
    Interacting,
    /// No recent input; draw at full resolution.
    Settled,
    /// Torn down; ignores input until started again.
    Disposed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderTier {
    LowResolution,
    FullResolution,
}

/// Chooses the resolution tier from interaction history.
///
/// Any input switches to [`LodState::Interacting`] and restarts the settle
/// timer; when the timer fires the view returns to [`LodState::Settled`].
#[derive(Debug, Clone)]
pub struct LodController {
    state: LodState,
    settle: Debouncer,
}

impl LodController {
    #[must_use]
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            state: LodState::Idle,
            settle: Debouncer::new(settle_delay),
        }
    }

    #[must_use]
    pub fn state(&self) -> LodState {
        self.state
    }

    #[must_use]
    pub fn tier(&self) -> RenderTier {
        match self.state {
            LodState::Interacting => RenderTier::LowResolution,
            LodState::Idle | LodState::Settled | LodState::Disposed => RenderTier::FullResolution,
        }
    }

    pub fn start(&mut self) {
        self.settle.cancel();
        self.transition(LodState::Settled);
    }

    /// Records an input event at `now`. Ignored once disposed.
    pub fn interact(&mut self, now: Instant) {
        if self.state == LodState::Disposed {
            return;
        }

        self.settle.arm(now);
        self.transition(LodState::Interacting);
    }

    /// Drops any pending settle timer and draws at full resolution again.
    pub fn settle_now(&mut self) {
        self.settle.cancel();
        if self.state == LodState::Interacting {
            self.transition(LodState::Settled);
        }
    }

    /// Returns `true` exactly once when the settle timer fires; the caller
    /// must then force a full-resolution redraw.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.settle.poll(now) {
            return false;
        }

        if self.state != LodState::Interacting {
            return false;
        }

        self.transition(LodState::Settled);
        true
    }

    pub fn dispose(&mut self) {
        self.settle.cancel();
        self.transition(LodState::Disposed);
    }

    #[must_use]
    pub fn settle_deadline(&self) -> Option<Instant> {
        self.settle.deadline()
    }

    fn transition(&mut self, next: LodState) {
        if self.state != next {
            debug!("lod: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTLE: Duration = Duration::from_millis(500);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_idle_and_settles_on_start() {
        let mut lod = LodController::new(SETTLE);
        assert_eq!(lod.state(), LodState::Idle);

        lod.start();
        assert_eq!(lod.state(), LodState::Settled);
        assert_eq!(lod.tier(), RenderTier::FullResolution);
    }

    #[test]
    fn interaction_uses_low_resolution_until_quiet() {
        let t0 = Instant::now();
        let mut lod = LodController::new(SETTLE);
        lod.start();

        lod.interact(t0);
        assert_eq!(lod.tier(), RenderTier::LowResolution);

        assert!(!lod.poll(t0 + ms(499)));
        assert_eq!(lod.state(), LodState::Interacting);

        assert!(lod.poll(t0 + ms(500)));
        assert_eq!(lod.state(), LodState::Settled);
        assert_eq!(lod.tier(), RenderTier::FullResolution);
    }

    #[test]
    fn each_input_restarts_the_settle_timer_and_it_fires_once() {
        let t0 = Instant::now();
        let mut lod = LodController::new(SETTLE);
        lod.start();

        lod.interact(t0);
        lod.interact(t0 + ms(100));
        lod.interact(t0 + ms(200));

        assert!(!lod.poll(t0 + ms(600)));
        assert_eq!(lod.tier(), RenderTier::LowResolution);

        assert!(lod.poll(t0 + ms(700)));
        assert!(!lod.poll(t0 + ms(1200)));
        assert!(!lod.poll(t0 + ms(5000)));
    }

    #[test]
    fn disposed_controller_ignores_input() {
        let t0 = Instant::now();
        let mut lod = LodController::new(SETTLE);
        lod.start();
        lod.interact(t0);
        lod.dispose();

        lod.interact(t0 + ms(10));
        assert_eq!(lod.state(), LodState::Disposed);
        assert!(!lod.poll(t0 + ms(1000)));

        lod.start();
        assert_eq!(lod.state(), LodState::Settled);
    }

    #[test]
    fn settle_now_returns_to_full_resolution() {
        let t0 = Instant::now();
        let mut lod = LodController::new(SETTLE);
        lod.start();
        lod.interact(t0);

        lod.settle_now();

        assert_eq!(lod.tier(), RenderTier::FullResolution);
        assert!(lod.settle_deadline().is_none());
    }
}
