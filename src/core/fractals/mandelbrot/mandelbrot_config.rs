use crate::core::data::complex::Complex;
use crate::core::data::viewport::Viewport;

pub const DEFAULT_ITERATION_DEPTH: u32 = 20;

const DEFAULT_CENTER: Complex = Complex {
    real: -0.5,
    imag: 0.0,
};
const STILL_IMAGE_SCALE: f64 = 2.0;
const CONTINUOUS_SCALE: f64 = 3.0;

/// Default views and iteration depth for a fresh session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotConfig {
    pub still_viewport: Viewport,
    pub continuous_viewport: Viewport,
    pub iteration_depth: u32,
}

impl Default for MandelbrotConfig {
    fn default() -> Self {
        Self {
            still_viewport: Viewport::new(DEFAULT_CENTER, STILL_IMAGE_SCALE),
            continuous_viewport: Viewport::new(DEFAULT_CENTER, CONTINUOUS_SCALE),
            iteration_depth: DEFAULT_ITERATION_DEPTH,
        }
    }
}

impl MandelbrotConfig {
    /// Puts both views back to their defaults. The iteration depth is kept.
    pub fn reset_view(&mut self) {
        let defaults = Self::default();
        self.still_viewport = defaults.still_viewport;
        self.continuous_viewport = defaults.continuous_viewport;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MandelbrotConfig::default();

        assert_eq!(config.still_viewport.center(), Complex::new(-0.5, 0.0));
        assert_eq!(config.still_viewport.scale(), 2.0);
        assert_eq!(config.continuous_viewport.scale(), 3.0);
        assert_eq!(config.iteration_depth, 20);
    }

    #[test]
    fn test_reset_view_keeps_depth() {
        let mut config = MandelbrotConfig::default();
        config.still_viewport = Viewport::new(Complex::new(0.3, 0.1), 0.01);
        config.continuous_viewport = Viewport::new(Complex::new(-1.0, 0.2), 0.5);
        config.iteration_depth = 90;

        config.reset_view();

        assert_eq!(config.still_viewport, MandelbrotConfig::default().still_viewport);
        assert_eq!(config.continuous_viewport, MandelbrotConfig::default().continuous_viewport);
        assert_eq!(config.iteration_depth, 90);
    }
}
