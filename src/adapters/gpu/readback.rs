use std::sync::mpsc;

use crate::adapters::gpu::context::{GpuContext, capture_errors};
use crate::adapters::gpu::errors::GpuPassError;
use crate::adapters::gpu::texture::GpuTexture;
use crate::core::data::frame_buffer::{BYTES_PER_PIXEL, FrameBuffer};

/// Copy of a texture into a mappable buffer, recorded but not yet finished.
pub struct PendingReadback {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_bytes_per_row: u32,
}

/// A readback whose buffer is mapped and ready to be copied to the CPU.
pub struct MappedReadback {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_bytes_per_row: u32,
}

impl PendingReadback {
    /// Records a copy of `source` into a new staging buffer on `encoder`.
    pub fn encode(
        context: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        source: &GpuTexture,
    ) -> Result<Self, GpuPassError> {
        let width = source.width();
        let height = source.height();
        let padded_bytes_per_row = padded_bytes_per_row(width);
        let bytes = u64::from(padded_bytes_per_row) * u64::from(height);

        let limit = context.device().limits().max_buffer_size;
        if bytes > limit {
            return Err(GpuPassError::ExceedsBufferLimit { bytes, limit });
        }

        let device = context.device();
        let buffer = capture_errors(device, || {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("readback staging buffer"),
                size: bytes,
                usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        })
        .map_err(|err| GpuPassError::Allocation(err.to_string()))?;

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: source.texture(),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        Ok(Self {
            buffer,
            width,
            height,
            padded_bytes_per_row,
        })
    }

    /// Waits for the GPU to finish the copy and maps the staging buffer.
    ///
    /// The submission holding the copy must already be on the queue.
    pub fn wait(self, context: &GpuContext) -> Result<MappedReadback, GpuPassError> {
        let (sender, receiver) = mpsc::channel();
        self.buffer
            .slice(..)
            .map_async(wgpu::MapMode::Read, move |result| {
                let _ = sender.send(result);
            });

        context.wait_idle();

        receiver
            .recv()
            .map_err(|_| GpuPassError::Readback("map callback was dropped".to_owned()))?
            .map_err(|err| GpuPassError::Readback(err.to_string()))?;

        Ok(MappedReadback {
            buffer: self.buffer,
            width: self.width,
            height: self.height,
            padded_bytes_per_row: self.padded_bytes_per_row,
        })
    }
}

impl MappedReadback {
    pub fn into_frame_buffer(self) -> Result<FrameBuffer, GpuPassError> {
        let data = {
            let mapped = self.buffer.slice(..).get_mapped_range();
            strip_row_padding(&mapped, self.width, self.height, self.padded_bytes_per_row)
        };
        self.buffer.unmap();

        Ok(FrameBuffer::from_data(self.width, self.height, data)?)
    }
}

/// Bytes per row of a texture copy, rounded up to the copy alignment.
#[must_use]
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL as u32;
    unpadded.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT
}

#[must_use]
pub fn strip_row_padding(padded: &[u8], width: u32, height: u32, padded_bytes_per_row: u32) -> Vec<u8> {
    let row_bytes = width as usize * BYTES_PER_PIXEL;
    let mut data = Vec::with_capacity(row_bytes * height as usize);

    for row in padded
        .chunks(padded_bytes_per_row as usize)
        .take(height as usize)
    {
        data.extend_from_slice(&row[..row_bytes]);
    }

    data
}
