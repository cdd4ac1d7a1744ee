//! GUI input adapter for interactive exploration.
//!
//! This module provides a windowed interface using winit for window management,
//! pixels for framebuffer presentation, and egui for the controls.

pub mod app;
pub mod commands;
pub mod ui_state;

pub use commands::run_gui::RunGuiCommand;
