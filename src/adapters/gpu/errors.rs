use crate::core::data::frame_buffer::FrameBufferError;

#[derive(Debug, thiserror::Error)]
pub enum GpuSetupError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("GPU device request failed: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
    #[error("GPU pipeline creation failed: {0}")]
    Pipeline(String),
}

#[derive(Debug, thiserror::Error)]
pub enum GpuPassError {
    #[error("{width}x{height} exceeds the device limit of {limit} pixels per side")]
    ExceedsTextureLimit { width: u32, height: u32, limit: u32 },
    #[error("readback buffer of {bytes} bytes exceeds the device limit of {limit} bytes")]
    ExceedsBufferLimit { bytes: u64, limit: u64 },
    #[error("GPU allocation failed: {0}")]
    Allocation(String),
    #[error("GPU readback failed: {0}")]
    Readback(String),
    #[error(transparent)]
    FrameBuffer(#[from] FrameBufferError),
}
