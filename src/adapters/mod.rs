//! Infrastructure adapters: GPU plumbing and pixel format helpers.

pub mod gpu;
pub mod pixel_format;
