use std::time::Instant;

use crate::core::data::point::ScreenPoint;
use crate::core::data::viewport::Viewport;

/// Pointer and surface events a live view reacts to. Positions are in
/// physical pixels of the drawable surface.
pub trait ViewportInput {
    fn resize(&mut self, width: u32, height: u32);

    /// Jumps straight to `viewport`, dropping any interaction in progress.
    fn set_viewport(&mut self, viewport: Viewport);

    fn pointer_down(&mut self, position: ScreenPoint, now: Instant);

    fn pointer_dragged(&mut self, position: ScreenPoint, now: Instant);

    fn pointer_up(&mut self, now: Instant);

    /// Wheel scroll; positive `delta_y` zooms in.
    fn scroll(&mut self, position: ScreenPoint, delta_y: f64, now: Instant);

    /// Pinch gesture; positive `magnification` zooms in.
    fn magnify(&mut self, position: ScreenPoint, magnification: f64, now: Instant);
}
