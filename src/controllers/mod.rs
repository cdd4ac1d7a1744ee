//! Rendering controllers and the coordination around them.
//!
//! - `still` holds the one-shot CPU and GPU rasterizers.
//! - `continuous` holds the GPU renderer that redraws while the user pans
//!   and zooms, with its level-of-detail state machine.
//! - `coordinator` resolves which controller serves a strategy and mode.
//! - `export` saves the active controller's image through an image sink.

pub mod continuous;
pub mod coordinator;
pub mod data;
pub mod errors;
pub mod events;
pub mod export;
pub mod ports;
pub mod still;
