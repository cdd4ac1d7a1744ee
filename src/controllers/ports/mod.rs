pub mod image_sink;
pub mod render_controller;
pub mod viewport_input;
