use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::actions::cancellation::{CancelToken, CancellationToken};
use crate::core::actions::progress::ProgressSink;

/// The three signals shared between the UI and whichever controller is active.
///
/// The UI raises `generating` to request a render and raises `cancel` to stop
/// one; the controller lowers `generating` when its pass ends and is the only
/// writer of `progress`.
#[derive(Debug, Clone, Default)]
pub struct RenderSignals {
    generating: Arc<AtomicBool>,
    progress: ProgressSink,
    cancel: CancellationToken,
}

impl RenderSignals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::Acquire)
    }

    pub fn set_generating(&self, generating: bool) {
        self.generating.store(generating, Ordering::Release);
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    #[must_use]
    pub fn progress_sink(&self) -> &ProgressSink {
        &self.progress
    }

    #[must_use]
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn request_cancel(&self) {
        self.cancel.cancel();
    }

    pub fn clear_cancel(&self) {
        self.cancel.reset();
    }

    #[must_use]
    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Returns every signal to its idle value: not generating, no progress,
    /// no pending cancel.
    pub fn reset(&self) {
        self.set_generating(false);
        self.progress.reset();
        self.cancel.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let ui = RenderSignals::new();
        let worker = ui.clone();

        ui.set_generating(true);
        ui.request_cancel();
        worker.progress_sink().set(0.5);

        assert!(worker.is_generating());
        assert!(worker.is_cancel_requested());
        assert_eq!(ui.progress(), 0.5);
    }

    #[test]
    fn reset_returns_to_idle() {
        let signals = RenderSignals::new();
        signals.set_generating(true);
        signals.request_cancel();
        signals.progress_sink().set(0.3);

        signals.reset();

        assert!(!signals.is_generating());
        assert!(!signals.is_cancel_requested());
        assert_eq!(signals.progress(), 0.0);
    }
}
