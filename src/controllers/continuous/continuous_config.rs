use std::time::Duration;

/// Tuning for the live view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousConfig {
    /// Side length of the low-resolution target relative to the surface.
    pub low_resolution_factor: f64,
    /// Quiet time after the last input before the view sharpens.
    pub settle_delay: Duration,
    /// Draws requested sooner than this after the previous one are skipped.
    pub frame_interval: Duration,
    /// Zoom factor per wheel unit: `1 − delta · sensitivity`.
    pub scroll_zoom_sensitivity: f64,
    /// Zoom factor per pinch unit: `1 − magnification · sensitivity`.
    pub magnify_zoom_sensitivity: f64,
    /// Smallest zoom factor a single input can apply.
    pub min_zoom_factor: f64,
}

impl Default for ContinuousConfig {
    fn default() -> Self {
        Self {
            low_resolution_factor: 0.25,
            settle_delay: Duration::from_millis(500),
            frame_interval: Duration::from_secs_f64(1.0 / 60.0),
            scroll_zoom_sensitivity: 0.05,
            magnify_zoom_sensitivity: 0.5,
            min_zoom_factor: 0.01,
        }
    }
}

impl ContinuousConfig {
    /// Size of the low-resolution target for a `width × height` surface.
    #[must_use]
    pub fn low_resolution_size(&self, width: u32, height: u32) -> (u32, u32) {
        let scale = |side: u32| ((f64::from(side) * self.low_resolution_factor) as u32).max(1);
        (scale(width), scale(height))
    }

    #[must_use]
    pub fn scroll_factor(&self, delta_y: f64) -> f64 {
        self.clamp_factor(1.0 - delta_y * self.scroll_zoom_sensitivity)
    }

    #[must_use]
    pub fn magnify_factor(&self, magnification: f64) -> f64 {
        self.clamp_factor(1.0 - magnification * self.magnify_zoom_sensitivity)
    }

    fn clamp_factor(&self, factor: f64) -> f64 {
        if factor.is_nan() {
            return 1.0;
        }
        factor.max(self.min_zoom_factor)
    }
}
