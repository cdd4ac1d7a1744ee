use bytemuck::{Pod, Zeroable};

use crate::core::data::viewport::Viewport;

/// Uniform block read by `escape_time.wgsl`. Field order and size must match
/// the shader's `KernelParams`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct KernelParams {
    pub center: [f32; 2],
    pub scale: f32,
    pub aspect: f32,
    pub max_iterations: u32,
    pub width: u32,
    pub height: u32,
    pub _padding: u32,
}

impl KernelParams {
    #[must_use]
    pub fn new(viewport: &Viewport, max_iterations: u32, width: u32, height: u32) -> Self {
        let center = viewport.center();
        let aspect = if width == 0 {
            1.0
        } else {
            height as f32 / width as f32
        };

        Self {
            center: [center.real as f32, center.imag as f32],
            scale: viewport.scale() as f32,
            aspect,
            max_iterations,
            width,
            height,
            _padding: 0,
        }
    }
}
