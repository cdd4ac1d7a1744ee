use log::debug;

use crate::adapters::gpu::context::{GpuContext, capture_errors};
use crate::adapters::gpu::errors::GpuPassError;

pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// A 2D RGBA8 texture plus its default view.
pub struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl GpuTexture {
    /// Target for the escape-time kernel; can be sampled and copied out.
    pub fn storage_target(
        context: &GpuContext,
        width: u32,
        height: u32,
        label: &str,
    ) -> Result<Self, GpuPassError> {
        Self::allocate(
            context,
            width,
            height,
            wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            label,
        )
    }

    /// Render target that stands in for a window surface; can be copied out.
    pub fn present_surface(
        context: &GpuContext,
        width: u32,
        height: u32,
        label: &str,
    ) -> Result<Self, GpuPassError> {
        Self::allocate(
            context,
            width,
            height,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            label,
        )
    }

    fn allocate(
        context: &GpuContext,
        width: u32,
        height: u32,
        usage: wgpu::TextureUsages,
        label: &str,
    ) -> Result<Self, GpuPassError> {
        let limit = context.max_texture_side();
        if width == 0 || height == 0 || width > limit || height > limit {
            return Err(GpuPassError::ExceedsTextureLimit {
                width,
                height,
                limit,
            });
        }

        let device = context.device();
        let texture = capture_errors(device, || {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: TEXTURE_FORMAT,
                usage,
                view_formats: &[],
            })
        })
        .map_err(|err| GpuPassError::Allocation(err.to_string()))?;

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        debug!("allocated {label} texture {width}x{height}");

        Ok(Self {
            texture,
            view,
            width,
            height,
        })
    }

    #[must_use]
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    #[must_use]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn has_size(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_texture_is_rejected_before_touching_the_device() {
        let Ok(context) = GpuContext::new("texture-test") else {
            log::warn!("skipping texture test: no GPU");
            return;
        };

        let limit = context.max_texture_side();
        let result = GpuTexture::storage_target(&context, limit + 1, 16, "too wide");

        assert!(matches!(
            result,
            Err(GpuPassError::ExceedsTextureLimit { .. })
        ));
    }

    #[test]
    fn allocated_texture_reports_its_size() {
        let Ok(context) = GpuContext::new("texture-test") else {
            log::warn!("skipping texture test: no GPU");
            return;
        };

        let texture = GpuTexture::present_surface(&context, 40, 30, "surface").unwrap();

        assert!(texture.has_size(40, 30));
        assert!(!texture.has_size(30, 40));
    }
}
