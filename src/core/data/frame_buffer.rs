use crate::core::data::colour::Colour;
use crate::core::data::point::Point;

pub const BYTES_PER_PIXEL: usize = 4;

fn frame_size_in_bytes(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameBufferError {
    #[error("pixel at x:{}, y:{} outside of {width}x{height} frame", .pixel.x, .pixel.y)]
    PixelOutsideBounds {
        pixel: Point,
        width: u32,
        height: u32,
    },
    #[error("frame size {expected} does not match buffer size {actual}")]
    BoundsMismatch { expected: usize, actual: usize },
}

/// A finished raster: 8-bit RGBA, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameBuffer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; frame_size_in_bytes(width, height)],
        }
    }

    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self, FrameBufferError> {
        let expected = frame_size_in_bytes(width, height);

        if expected != data.len() {
            return Err(FrameBufferError::BoundsMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
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
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn pixel(&self, pixel: Point) -> Option<Colour> {
        let index = self.index_of(pixel)?;
        let bytes = &self.data[index..index + BYTES_PER_PIXEL];

        Some(Colour {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
        })
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), FrameBufferError> {
        let index = self
            .index_of(pixel)
            .ok_or(FrameBufferError::PixelOutsideBounds {
                pixel,
                width: self.width,
                height: self.height,
            })?;

        self.data[index..index + BYTES_PER_PIXEL].copy_from_slice(&colour.to_rgba());
        Ok(())
    }

    fn index_of(&self, pixel: Point) -> Option<usize> {
        if pixel.x >= self.width || pixel.y >= self.height {
            return None;
        }

        Some((pixel.y as usize * self.width as usize + pixel.x as usize) * BYTES_PER_PIXEL)
    }
}
