use std::sync::Arc;
use std::time::Instant;

use log::{error, warn};

use crate::adapters::gpu::context::GpuContext;
use crate::adapters::gpu::errors::{GpuPassError, GpuSetupError};
use crate::adapters::gpu::kernel_params::KernelParams;
use crate::adapters::gpu::readback::PendingReadback;
use crate::adapters::gpu::texture::GpuTexture;
use crate::controllers::data::render_request::ControllerSlot;
use crate::controllers::data::render_signals::RenderSignals;
use crate::controllers::errors::rendering::RenderingError;
use crate::controllers::events::pass_event::AbortReason;
use crate::controllers::ports::render_controller::{RenderController, StartOutcome};
use crate::controllers::still::pass_session::PassSession;
use crate::core::actions::cancellation::CancelToken;
use crate::core::data::frame_buffer::FrameBuffer;
use crate::core::data::render_params::RenderParameters;

/// Coarse progress published once the dispatch has been submitted.
pub const SUBMITTED_PROGRESS: f64 = 0.5;

/// Still images from a single compute dispatch.
pub struct GpuRasterizer {
    context: Option<Arc<GpuContext>>,
    session: PassSession,
}

impl Default for GpuRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuRasterizer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_context(GpuContext::new("gpu-rasterizer"))
    }

    #[must_use]
    pub fn with_context(context: Result<GpuContext, GpuSetupError>) -> Self {
        let context = match context {
            Ok(context) => Some(Arc::new(context)),
            Err(err) => {
                error!("gpu: rasterizer disabled: {err}");
                None
            }
        };

        Self {
            context,
            session: PassSession::new("gpu"),
        }
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.context.is_none()
    }
}

fn render_pass(
    context: &GpuContext,
    params: &RenderParameters,
    signals: &RenderSignals,
) -> Result<FrameBuffer, AbortReason> {
    let cancel = signals.cancel_token();
    if cancel.is_cancelled() {
        return Err(AbortReason::Cancelled);
    }

    let failed = |err: GpuPassError| AbortReason::Failed(err.to_string());

    let target =
        GpuTexture::storage_target(context, params.width(), params.height(), "still target")
            .map_err(failed)?;

    let mut encoder = context
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("still pass encoder"),
        });
    let kernel_params = KernelParams::new(
        &params.viewport(),
        params.iteration_depth(),
        params.width(),
        params.height(),
    );
    context
        .escape_time()
        .encode(context.device(), &mut encoder, &target, &kernel_params);
    let readback = PendingReadback::encode(context, &mut encoder, &target).map_err(failed)?;

    context.queue().submit(std::iter::once(encoder.finish()));
    signals.progress_sink().advance_to(SUBMITTED_PROGRESS);

    let mapped = readback.wait(context).map_err(failed)?;

    if cancel.is_cancelled() {
        return Err(AbortReason::Cancelled);
    }

    mapped.into_frame_buffer().map_err(failed)
}

impl RenderController for GpuRasterizer {
    fn slot(&self) -> ControllerSlot {
        ControllerSlot::GpuOneShot
    }

    fn start(&mut self, params: RenderParameters, signals: RenderSignals) -> StartOutcome {
        let Some(context) = &self.context else {
            warn!("gpu: start ignored, rasterizer is disabled");
            signals.progress_sink().reset();
            signals.set_generating(false);
            return StartOutcome::Disabled;
        };

        let context = Arc::clone(context);
        self.session.start(params, signals, move |params, signals| {
            render_pass(&context, params, signals)
        })
    }

    fn tick(&mut self, _now: Instant) {
        self.session.poll();
    }

    fn has_rendered(&self) -> bool {
        self.session.has_rendered()
    }

    fn snapshot(&mut self) -> Result<Arc<FrameBuffer>, RenderingError> {
        self.session.image().ok_or(RenderingError::NoImageAvailable)
    }

    fn dispose(&mut self) {
        self.session.dispose();
    }
}
