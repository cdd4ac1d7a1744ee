use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fraction of the current pass that is done, in `[0, 1]`.
///
/// Written by the rendering side, read by whoever displays it. Stored as the
/// bit pattern of an `f64` so reads never block.
#[derive(Debug, Clone, Default)]
pub struct ProgressSink {
    bits: Arc<AtomicU64>,
}

impl ProgressSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub fn set(&self, value: f64) {
        self.bits
            .store(clamp_unit(value).to_bits(), Ordering::Release);
    }

    /// Raises progress to `value`; never moves it backwards.
    pub fn advance_to(&self, value: f64) {
        let value = clamp_unit(value);
        let _ = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (value > f64::from_bits(current)).then_some(value.to_bits())
            });
    }

    pub fn reset(&self) {
        self.set(0.0);
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
