use std::ops::RangeInclusive;
use std::path::Path;

use crate::controllers::data::render_request::{
    ControllerSlot, GenerationMode, RenderRequest, RenderStrategy,
};
use crate::controllers::data::render_signals::RenderSignals;
use crate::controllers::errors::rendering::RenderingError;
use crate::core::fractals::mandelbrot::mandelbrot_config::MandelbrotConfig;

/// Depths offered for still images; 143 renders a 16348 px square raster.
pub const STILL_ITERATION_DEPTH_RANGE: RangeInclusive<u32> = 10..=143;
/// The live view renders at window size, whatever the depth.
pub const CONTINUOUS_ITERATION_DEPTH_RANGE: RangeInclusive<u32> = 10..=1000;

/// Everything the window remembers between frames, apart from the controllers.
pub struct GuiAppState {
    pub strategy: RenderStrategy,
    pub mode: GenerationMode,
    pub config: MandelbrotConfig,
    signals: RenderSignals,
    error_message: Option<String>,
    notice: Option<String>,
}

impl Default for GuiAppState {
    fn default() -> Self {
        Self {
            strategy: RenderStrategy::default(),
            mode: GenerationMode::default(),
            config: MandelbrotConfig::default(),
            signals: RenderSignals::new(),
            error_message: None,
            notice: None,
        }
    }
}

impl GuiAppState {
    #[must_use]
    pub fn slot(&self) -> ControllerSlot {
        ControllerSlot::resolve(self.strategy, self.mode)
    }

    #[must_use]
    pub fn iteration_depth_range(&self) -> RangeInclusive<u32> {
        match self.mode {
            GenerationMode::StillImage => STILL_ITERATION_DEPTH_RANGE,
            GenerationMode::Continuous => CONTINUOUS_ITERATION_DEPTH_RANGE,
        }
    }

    /// Switches the generation mode. The live view only runs on the GPU, and
    /// a depth picked for it is pulled back into the still-image range.
    pub fn select_mode(&mut self, mode: GenerationMode) {
        self.mode = mode;
        match mode {
            GenerationMode::Continuous => self.strategy = RenderStrategy::Gpu,
            GenerationMode::StillImage => {
                let range = STILL_ITERATION_DEPTH_RANGE;
                self.config.iteration_depth = self
                    .config
                    .iteration_depth
                    .clamp(*range.start(), *range.end());
            }
        }
    }

    #[must_use]
    pub fn signals(&self) -> &RenderSignals {
        &self.signals
    }

    #[must_use]
    pub fn build_render_request(&self, viewport_size: (u32, u32)) -> RenderRequest {
        RenderRequest {
            strategy: self.strategy,
            mode: self.mode,
            iteration_depth: self.config.iteration_depth,
            viewport_size,
            still_side: None,
        }
    }

    /// Asks for a new generation. A leftover cancel from the previous one is
    /// lowered so the start is not blocked.
    pub fn request_generation(&mut self) {
        self.signals.clear_cancel();
        self.signals.set_generating(true);
    }

    pub fn request_cancel(&self) {
        self.signals.request_cancel();
    }

    /// Switches to a fresh set of signals, leaving the old ones to whatever
    /// controller still holds them.
    pub fn detach_signals(&mut self) {
        self.signals.request_cancel();
        self.signals = RenderSignals::new();
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn report(&mut self, error: &RenderingError) {
        self.error_message = Some(error.to_string());
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn report_saved(&mut self, path: &Path) {
        let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        self.notice = Some(format!("Image saved successfully to {}", shown.display()));
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn reset_view(&mut self) {
        self.config.reset_view();
    }
}
