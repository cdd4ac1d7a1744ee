use crate::core::data::complex::Complex;

/// Smallest half-extent a viewport may zoom to before `f64` loses the detail.
pub const MIN_SCALE: f64 = 1e-15;

/// A view onto the complex plane.
///
/// `scale` is the half-extent of the horizontal axis: a view of width `W`
/// spans `center.real ± scale`. The vertical half-extent is `scale · H / W`,
/// so square views cover the same range on both axes and wider views never
/// stretch the set.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    center: Complex,
    scale: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(center: Complex, scale: f64) -> Self {
        Self {
            center,
            scale: clamp_scale(scale),
        }
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        self.center
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps a normalised coordinate (`u` right, `v` down, both in `[0, 1]`)
    /// to the complex plane. `aspect` is `height / width`.
    #[must_use]
    pub fn uv_to_complex(&self, u: f64, v: f64, aspect: f64) -> Complex {
        Complex {
            real: self.center.real + (u - 0.5) * self.scale * 2.0,
            imag: self.center.imag + (v - 0.5) * self.scale * 2.0 * aspect,
        }
    }

    #[must_use]
    pub fn complex_to_uv(&self, c: Complex, aspect: f64) -> (f64, f64) {
        let u = (c.real - self.center.real) / (self.scale * 2.0) + 0.5;
        let v = (c.imag - self.center.imag) / (self.scale * 2.0 * aspect) + 0.5;
        (u, v)
    }

    /// Complex coordinate of the top-left corner of pixel `(col, row)` in a
    /// `width × height` raster.
    #[must_use]
    pub fn pixel_to_complex(&self, col: f64, row: f64, width: u32, height: u32) -> Complex {
        let width = f64::from(width);
        let height = f64::from(height);
        self.uv_to_complex(col / width, row / height, height / width)
    }

    #[must_use]
    pub fn complex_to_pixel(&self, c: Complex, width: u32, height: u32) -> (f64, f64) {
        let width = f64::from(width);
        let height = f64::from(height);
        let (u, v) = self.complex_to_uv(c, height / width);
        (u * width, v * height)
    }

    /// Scales the view by `factor` while keeping the point under `(u, v)`
    /// fixed. Non-positive or non-finite factors are ignored.
    pub fn zoom_around(&mut self, u: f64, v: f64, factor: f64, aspect: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }

        let anchor = self.uv_to_complex(u, v, aspect);
        self.scale = clamp_scale(self.scale * factor);
        self.center = Complex {
            real: anchor.real - (u - 0.5) * self.scale * 2.0,
            imag: anchor.imag - (v - 0.5) * self.scale * 2.0 * aspect,
        };
    }

    /// Moves the view so the content follows a pointer drag of
    /// `(dx, dy)` pixels on a surface `width` pixels wide.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64, width: u32) {
        if width == 0 {
            return;
        }

        let units_per_pixel = self.scale * 2.0 / f64::from(width);
        self.center = Complex {
            real: self.center.real - dx * units_per_pixel,
            imag: self.center.imag - dy * units_per_pixel,
        };
    }
}

fn clamp_scale(scale: f64) -> f64 {
    // f64::max drops a NaN operand
    scale.max(MIN_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPSILON, "{a} is not close to {b}");
    }

    #[test]
    fn test_centre_pixel_maps_to_centre() {
        let viewport = Viewport::new(Complex::new(-0.5, 0.0), 2.0);
        let c = viewport.pixel_to_complex(50.0, 50.0, 100, 100);

        assert_close(c.real, -0.5);
        assert_close(c.imag, 0.0);
    }

    #[test]
    fn test_square_raster_covers_centre_plus_minus_scale() {
        let viewport = Viewport::new(Complex::new(-0.5, 0.0), 2.0);

        let top_left = viewport.pixel_to_complex(0.0, 0.0, 4096, 4096);
        assert_close(top_left.real, -2.5);
        assert_close(top_left.imag, -2.0);

        let bottom_right = viewport.pixel_to_complex(4096.0, 4096.0, 4096, 4096);
        assert_close(bottom_right.real, 1.5);
        assert_close(bottom_right.imag, 2.0);
    }

    #[test]
    fn test_pixel_round_trip_is_exact_within_float_precision() {
        let viewport = Viewport::new(Complex::new(-0.743643887037151, 0.13182590420533), 1e-6);

        for (col, row) in [(0.0, 0.0), (17.0, 923.0), (511.5, 255.25), (1023.0, 767.0)] {
            let c = viewport.pixel_to_complex(col, row, 1024, 768);
            let (back_col, back_row) = viewport.complex_to_pixel(c, 1024, 768);
            assert!((back_col - col).abs() < 1e-6);
            assert!((back_row - row).abs() < 1e-6);
        }
    }

    #[test]
    fn test_wide_view_keeps_pixels_square() {
        let viewport = Viewport::new(Complex::new(0.0, 0.0), 1.0);
        let a = viewport.pixel_to_complex(0.0, 0.0, 200, 100);
        let b = viewport.pixel_to_complex(1.0, 1.0, 200, 100);

        assert_close(b.real - a.real, b.imag - a.imag);
    }

    #[test]
    fn test_zoom_keeps_point_under_cursor_fixed() {
        let mut viewport = Viewport::new(Complex::new(-0.5, 0.0), 3.0);
        let aspect = 0.75;
        let before = viewport.uv_to_complex(0.8, 0.3, aspect);

        viewport.zoom_around(0.8, 0.3, 0.5, aspect);

        let after = viewport.uv_to_complex(0.8, 0.3, aspect);
        assert_close(before.real, after.real);
        assert_close(before.imag, after.imag);
        assert_close(viewport.scale(), 1.5);
    }

    #[test]
    fn test_zoom_in_then_out_around_same_cursor_restores_view() {
        let start = Viewport::new(Complex::new(-0.743, 0.131), 0.25);
        let aspect = 9.0 / 16.0;
        let cursors = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.5, 0.5), (0.8, 0.3)];

        for (u, v) in cursors {
            for factor in [0.5, 0.8, 1.25, 3.0] {
                let mut viewport = start;
                viewport.zoom_around(u, v, factor, aspect);
                viewport.zoom_around(u, v, 1.0 / factor, aspect);

                assert_close(viewport.center().real, start.center().real);
                assert_close(viewport.center().imag, start.center().imag);
                assert_close(viewport.scale(), start.scale());
            }
        }
    }

    #[test]
    fn test_zoom_clamps_scale_to_minimum() {
        let mut viewport = Viewport::new(Complex::new(0.0, 0.0), 1e-14);
        viewport.zoom_around(0.5, 0.5, 1e-6, 1.0);

        assert_eq!(viewport.scale(), MIN_SCALE);
    }

    #[test]
    fn test_zoom_ignores_invalid_factors() {
        let mut viewport = Viewport::new(Complex::new(0.0, 0.0), 1.0);

        viewport.zoom_around(0.2, 0.2, 0.0, 1.0);
        viewport.zoom_around(0.2, 0.2, -2.0, 1.0);
        viewport.zoom_around(0.2, 0.2, f64::NAN, 1.0);

        assert_eq!(viewport, Viewport::new(Complex::new(0.0, 0.0), 1.0));
    }

    #[test]
    fn test_new_clamps_scale() {
        assert_eq!(Viewport::new(Complex::new(0.0, 0.0), 0.0).scale(), MIN_SCALE);
        assert_eq!(Viewport::new(Complex::new(0.0, 0.0), f64::NAN).scale(), MIN_SCALE);
    }

    #[test]
    fn test_pan_moves_content_with_pointer() {
        let mut viewport = Viewport::new(Complex::new(0.0, 0.0), 1.0);
        let grabbed = viewport.pixel_to_complex(40.0, 60.0, 100, 100);

        viewport.pan_by_pixels(10.0, -5.0, 100);

        let under_pointer = viewport.pixel_to_complex(50.0, 55.0, 100, 100);
        assert_close(grabbed.real, under_pointer.real);
        assert_close(grabbed.imag, under_pointer.imag);
    }
}
