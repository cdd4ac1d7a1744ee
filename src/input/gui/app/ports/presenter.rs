use egui::Context as EguiContext;
use winit::window::Window;

use crate::adapters::pixel_format::DisplayTransform;
use crate::core::data::frame_buffer::FrameBuffer;

pub trait GuiPresenterPort {
    fn new(window: &'static Window) -> Self;
    /// Replaces the displayed image, scaled to fit the window and then
    /// zoomed and shifted by `transform`.
    fn show_frame(&mut self, frame: &FrameBuffer, transform: &DisplayTransform);
    fn clear(&mut self);
    fn render(&mut self, egui_output: egui::FullOutput, egui_ctx: &EguiContext) -> Result<(), pixels::Error>;
    fn resize(&mut self, width: u32, height: u32);
}
