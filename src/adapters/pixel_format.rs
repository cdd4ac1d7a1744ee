//! Pixel format helpers for presentation adapters.

use crate::core::data::colour::Colour;
use crate::core::data::frame_buffer::{BYTES_PER_PIXEL, FrameBuffer};

/// Each wheel notch zooms a displayed still image by this factor.
pub const DISPLAY_ZOOM_STEP: f64 = 1.5;

/// How a finished image sits in the window: a zoom relative to the fitted
/// size and an offset in window pixels from the centred position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplayTransform {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for DisplayTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl DisplayTransform {
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Positive `delta_y` zooms in by one step, negative zooms out.
    pub fn scroll(&mut self, delta_y: f64) {
        if delta_y > 0.0 {
            self.zoom *= DISPLAY_ZOOM_STEP;
        } else if delta_y < 0.0 {
            self.zoom /= DISPLAY_ZOOM_STEP;
        }
    }

    pub fn drag_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }
}

/// Scales `src` into an RGBA destination of `dst_width` x `dst_height`,
/// keeping its aspect ratio and filling the margins with opaque black.
///
/// # Panics
/// Panics if `dst.len()` does not equal `dst_width * dst_height * 4`.
pub fn fit_rgba_into(src: &FrameBuffer, dst: &mut [u8], dst_width: u32, dst_height: u32) {
    place_rgba_into(src, dst, dst_width, dst_height, &DisplayTransform::default());
}

/// Like [`fit_rgba_into`], then zooms the fitted image about the window
/// centre and shifts it by the transform's offset. Sampling is
/// nearest-neighbour; anything outside the image is opaque black.
///
/// # Panics
/// Panics if `dst.len()` does not equal `dst_width * dst_height * 4`.
pub fn place_rgba_into(
    src: &FrameBuffer,
    dst: &mut [u8],
    dst_width: u32,
    dst_height: u32,
    transform: &DisplayTransform,
) {
    let expected_dst_len = dst_width as usize * dst_height as usize * BYTES_PER_PIXEL;
    assert_eq!(
        dst.len(),
        expected_dst_len,
        "dst length {} does not match expected {}",
        dst.len(),
        expected_dst_len
    );

    let background = Colour::OPAQUE_BLACK.to_rgba();
    for pixel in dst.chunks_exact_mut(BYTES_PER_PIXEL) {
        pixel.copy_from_slice(&background);
    }

    let zoom = transform.zoom;
    if src.width() == 0 || src.height() == 0 || dst_width == 0 || dst_height == 0 {
        return;
    }
    if !zoom.is_finite() || zoom <= 0.0 {
        return;
    }

    let scale = zoom
        * f64::min(
            f64::from(dst_width) / f64::from(src.width()),
            f64::from(dst_height) / f64::from(src.height()),
        );
    let left = (f64::from(dst_width) - f64::from(src.width()) * scale) / 2.0 + transform.offset_x;
    let top = (f64::from(dst_height) - f64::from(src.height()) * scale) / 2.0 + transform.offset_y;

    let columns: Vec<Option<usize>> = (0..dst_width)
        .map(|x| source_index(x, left, scale, src.width()))
        .collect();

    let src_data = src.data();
    let src_stride = src.width() as usize * BYTES_PER_PIXEL;
    let dst_stride = dst_width as usize * BYTES_PER_PIXEL;

    for (y, dst_row) in dst.chunks_exact_mut(dst_stride).enumerate() {
        let Some(src_y) = source_index(y as u32, top, scale, src.height()) else {
            continue;
        };
        let src_row = &src_data[src_y * src_stride..(src_y + 1) * src_stride];

        for (dst_pixel, src_x) in dst_row.chunks_exact_mut(BYTES_PER_PIXEL).zip(&columns) {
            if let Some(src_x) = src_x {
                let from = src_x * BYTES_PER_PIXEL;
                dst_pixel.copy_from_slice(&src_row[from..from + BYTES_PER_PIXEL]);
            }
        }
    }
}

/// Source row or column shown at destination index `dst`, if any.
fn source_index(dst: u32, origin: f64, scale: f64, src_len: u32) -> Option<usize> {
    let position = ((f64::from(dst) - origin) / scale).floor();
    if position < 0.0 || position >= f64::from(src_len) {
        return None;
    }
    Some(position as usize)
}
