use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::escape_time::EscapeTime;

const SATURATION: f64 = 0.9;
const BASE_VALUE: f64 = 0.7;
const VALUE_RANGE: f64 = 0.3;

/// Smooth-iteration HSV palette: hue sweeps the wheel once over the iteration
/// budget, brightness rises from 0.7 towards 1. Bounded points are black.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SmoothHsvColourMap {
    max_iterations: u32,
}

impl SmoothHsvColourMap {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }

    #[must_use]
    pub fn map(&self, escape: EscapeTime) -> Colour {
        match escape {
            EscapeTime::Bounded => Colour::OPAQUE_BLACK,
            EscapeTime::Escaped { smooth, .. } => {
                let ratio = smooth / f64::from(self.max_iterations.max(1));
                let hue = (ratio * 360.0).rem_euclid(360.0);
                let value = (BASE_VALUE + ratio * VALUE_RANGE).clamp(0.0, 1.0);
                let [r, g, b] = hsv_to_rgb(hue, SATURATION, value);

                Colour::from_unit_rgb(r, g, b)
            }
        }
    }
}

/// `hue` in degrees `[0, 360)`, `saturation` and `value` in `[0, 1]`.
#[must_use]
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [f64; 3] {
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
    let m = value - chroma;

    let (r, g, b) = if sector < 1.0 {
        (chroma, x, 0.0)
    } else if sector < 2.0 {
        (x, chroma, 0.0)
    } else if sector < 3.0 {
        (0.0, chroma, x)
    } else if sector < 4.0 {
        (0.0, x, chroma)
    } else if sector < 5.0 {
        (x, 0.0, chroma)
    } else {
        (chroma, 0.0, x)
    };

    [r + m, g + m, b + m]
}
