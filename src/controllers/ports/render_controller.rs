use std::sync::Arc;
use std::time::Instant;

use crate::controllers::data::render_request::ControllerSlot;
use crate::controllers::data::render_signals::RenderSignals;
use crate::controllers::errors::rendering::RenderingError;
use crate::controllers::ports::viewport_input::ViewportInput;
use crate::core::data::frame_buffer::FrameBuffer;
use crate::core::data::render_params::RenderParameters;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A session is already running or holds a finished image.
    AlreadyActive,
    /// The controller could not be set up and will never render.
    Disabled,
    /// Resources for this pass could not be allocated; state was reset.
    Failed,
}

/// One rendering strategy. Owned by the consumer context and driven by it.
pub trait RenderController {
    fn slot(&self) -> ControllerSlot;

    /// Begins a session unless one is already active.
    fn start(&mut self, params: RenderParameters, signals: RenderSignals) -> StartOutcome;

    /// Applies whatever the worker side has published since the last call.
    fn tick(&mut self, now: Instant);

    fn has_rendered(&self) -> bool;

    /// A still image of the latest completed work, at full resolution.
    fn snapshot(&mut self) -> Result<Arc<FrameBuffer>, RenderingError>;

    /// Stops any running work and returns to the never-started state.
    fn dispose(&mut self);

    /// The frame to show on screen, when it changed since the last call or
    /// is cheap to hand out again.
    fn preview(&mut self) -> Option<Arc<FrameBuffer>> {
        self.snapshot().ok()
    }

    fn viewport_input(&mut self) -> Option<&mut dyn ViewportInput> {
        None
    }
}
