use std::path::Path;

use crate::core::data::frame_buffer::FrameBuffer;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImageSinkError {
    #[error("{len} bytes cannot form a {width}x{height} RGBA image")]
    Conversion { width: u32, height: u32, len: usize },
    #[error("{0}")]
    Write(String),
}

/// Accepts a finished RGBA8 frame and stores it somewhere outside the process.
pub trait ImageSinkPort {
    fn present(&self, frame: &FrameBuffer, filepath: &Path) -> Result<(), ImageSinkError>;
}
