use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, info, warn};

use crate::adapters::gpu::blit_pipeline::BlitPipeline;
use crate::adapters::gpu::context::GpuContext;
use crate::adapters::gpu::errors::{GpuPassError, GpuSetupError};
use crate::adapters::gpu::kernel_params::KernelParams;
use crate::adapters::gpu::readback::PendingReadback;
use crate::adapters::gpu::texture::GpuTexture;
use crate::controllers::continuous::continuous_config::ContinuousConfig;
use crate::controllers::continuous::lod::{LodController, LodState, RenderTier};
use crate::controllers::continuous::throttle::FrameThrottle;
use crate::controllers::data::render_request::ControllerSlot;
use crate::controllers::data::render_signals::RenderSignals;
use crate::controllers::errors::rendering::RenderingError;
use crate::controllers::ports::render_controller::{RenderController, StartOutcome};
use crate::controllers::ports::viewport_input::ViewportInput;
use crate::core::data::frame_buffer::FrameBuffer;
use crate::core::data::point::ScreenPoint;
use crate::core::data::render_params::RenderParameters;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::mandelbrot_config::MandelbrotConfig;

struct LiveGpu {
    context: GpuContext,
    blit: BlitPipeline,
}

/// Both render tiers plus the surface they are presented on.
struct LodTargets {
    low: GpuTexture,
    full: GpuTexture,
    surface: GpuTexture,
}

impl LodTargets {
    fn allocate(
        context: &GpuContext,
        config: &ContinuousConfig,
        width: u32,
        height: u32,
    ) -> Result<Self, GpuPassError> {
        let (low_width, low_height) = config.low_resolution_size(width, height);

        Ok(Self {
            low: GpuTexture::storage_target(context, low_width, low_height, "low-resolution target")?,
            full: GpuTexture::storage_target(context, width, height, "full-resolution target")?,
            surface: GpuTexture::present_surface(context, width, height, "present surface")?,
        })
    }

    fn tier(&self, tier: RenderTier) -> &GpuTexture {
        match tier {
            RenderTier::LowResolution => &self.low,
            RenderTier::FullResolution => &self.full,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn(RenderTier),
    /// Too soon after the previous draw; the redraw stays pending.
    Throttled,
    /// Nothing to draw: paused, stopped, or without GPU resources.
    Skipped,
}

/// Live pan-and-zoom view on the GPU.
///
/// Draws are driven by [`RenderController::tick`]: each draw re-runs the
/// escape-time kernel into the low- or full-resolution target, picked by the
/// [`LodController`], and scales it onto the present surface. The redraw
/// chain keeps going while the session is generating and not cancelled.
pub struct ContinuousRenderer {
    gpu: Option<LiveGpu>,
    config: ContinuousConfig,
    signals: Option<RenderSignals>,
    viewport: Viewport,
    iteration_depth: u32,
    lod: LodController,
    throttle: FrameThrottle,
    has_rendered: bool,
    paused: bool,
    redraw_requested: bool,
    surface_size: (u32, u32),
    targets: Option<LodTargets>,
    drag_anchor: Option<ScreenPoint>,
    last_submission: Option<wgpu::SubmissionIndex>,
    last_drawn_tier: Option<RenderTier>,
    surface_fresh: bool,
}

impl ContinuousRenderer {
    #[must_use]
    pub fn new(config: ContinuousConfig) -> Self {
        Self::with_context(GpuContext::new("continuous-renderer"), config)
    }

    #[must_use]
    pub fn with_context(context: Result<GpuContext, GpuSetupError>, config: ContinuousConfig) -> Self {
        let gpu = context.and_then(|context| {
            let blit = BlitPipeline::new(&context)?;
            Ok(LiveGpu { context, blit })
        });

        let gpu = match gpu {
            Ok(gpu) => Some(gpu),
            Err(err) => {
                error!("continuous: renderer disabled: {err}");
                None
            }
        };

        let defaults = MandelbrotConfig::default();

        Self {
            gpu,
            config,
            signals: None,
            viewport: defaults.continuous_viewport,
            iteration_depth: defaults.iteration_depth,
            lod: LodController::new(config.settle_delay),
            throttle: FrameThrottle::new(config.frame_interval),
            has_rendered: false,
            paused: true,
            redraw_requested: false,
            surface_size: (0, 0),
            targets: None,
            drag_anchor: None,
            last_submission: None,
            last_drawn_tier: None,
            surface_fresh: false,
        }
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.gpu.is_none()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn lod_state(&self) -> LodState {
        self.lod.state()
    }

    #[must_use]
    pub fn last_drawn_tier(&self) -> Option<RenderTier> {
        self.last_drawn_tier
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn wants_redraw(&self) -> bool {
        self.redraw_requested
    }

    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    /// When the host should tick next even without input.
    #[must_use]
    pub fn settle_deadline(&self) -> Option<Instant> {
        self.lod.settle_deadline()
    }

    /// Runs one draw if the throttle and session state allow it.
    pub fn draw(&mut self, now: Instant) -> DrawOutcome {
        if self.paused || !self.should_continue() {
            self.redraw_requested = false;
            return DrawOutcome::Skipped;
        }

        let (Some(gpu), Some(targets)) = (&self.gpu, &self.targets) else {
            self.redraw_requested = false;
            return DrawOutcome::Skipped;
        };

        if !self.throttle.try_acquire(now) {
            return DrawOutcome::Throttled;
        }

        if let Some(previous) = self.last_submission.take() {
            gpu.context.wait_for(previous);
        }

        let tier = self.lod.tier();
        let target = targets.tier(tier);
        let device = gpu.context.device();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("continuous draw encoder"),
        });
        let params = KernelParams::new(
            &self.viewport,
            self.iteration_depth,
            target.width(),
            target.height(),
        );
        gpu.context
            .escape_time()
            .encode(device, &mut encoder, target, &params);
        gpu.blit.encode(device, &mut encoder, target, &targets.surface);

        self.last_submission = Some(gpu.context.queue().submit(std::iter::once(encoder.finish())));
        self.last_drawn_tier = Some(tier);
        self.surface_fresh = true;
        self.redraw_requested = self.should_continue();

        DrawOutcome::Drawn(tier)
    }

    /// Reads back what the last draw put on the present surface.
    pub fn read_surface(&mut self) -> Result<Option<FrameBuffer>, GpuPassError> {
        let (Some(gpu), Some(targets)) = (&self.gpu, &self.targets) else {
            return Ok(None);
        };

        let context = &gpu.context;
        let mut encoder = context
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("surface readback encoder"),
            });
        let readback = PendingReadback::encode(context, &mut encoder, &targets.surface)?;
        context.queue().submit(std::iter::once(encoder.finish()));
        self.last_submission = None;

        Ok(Some(readback.wait(context)?.into_frame_buffer()?))
    }

    fn render_full_resolution(&mut self) -> Result<FrameBuffer, GpuPassError> {
        let (Some(gpu), Some(targets)) = (&self.gpu, &self.targets) else {
            return Err(GpuPassError::Allocation(
                "no render targets for the current surface".to_owned(),
            ));
        };

        let context = &gpu.context;
        let target = &targets.full;
        let mut encoder = context
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("export encoder"),
            });
        let params = KernelParams::new(
            &self.viewport,
            self.iteration_depth,
            target.width(),
            target.height(),
        );
        context
            .escape_time()
            .encode(context.device(), &mut encoder, target, &params);
        let readback = PendingReadback::encode(context, &mut encoder, target)?;
        context.queue().submit(std::iter::once(encoder.finish()));
        self.last_submission = None;

        readback.wait(context)?.into_frame_buffer()
    }

    fn should_continue(&self) -> bool {
        self.has_rendered
            && self
                .signals
                .as_ref()
                .is_some_and(|signals| signals.is_generating() && !signals.is_cancel_requested())
    }

    fn targets_match(&self, width: u32, height: u32) -> bool {
        self.targets
            .as_ref()
            .is_some_and(|targets| targets.full.has_size(width, height))
    }

    fn wait_for_gpu(&mut self) {
        if let (Some(gpu), Some(previous)) = (&self.gpu, self.last_submission.take()) {
            gpu.context.wait_for(previous);
        }
    }

    /// Drops the current targets and allocates new ones for the surface size.
    fn rebuild_targets(&mut self) {
        self.wait_for_gpu();
        self.targets = None;
        self.surface_fresh = false;

        let (width, height) = self.surface_size;
        let Some(gpu) = &self.gpu else {
            return;
        };
        if width == 0 || height == 0 {
            return;
        }

        match LodTargets::allocate(&gpu.context, &self.config, width, height) {
            Ok(targets) => {
                debug!("continuous: render targets rebuilt for {width}x{height}");
                self.targets = Some(targets);
            }
            Err(err) => warn!("continuous: could not allocate render targets: {err}"),
        }
    }

    fn end_session(&mut self, reason: &str) {
        info!("continuous: session ended ({reason})");
        self.has_rendered = false;
        self.redraw_requested = false;
        self.drag_anchor = None;

        if let Some(signals) = &self.signals {
            signals.progress_sink().reset();
            signals.set_generating(false);
        }
    }

    fn zoom_at(&mut self, position: ScreenPoint, factor: f64, now: Instant) {
        let (width, height) = self.surface_size;
        if width == 0 || height == 0 {
            return;
        }

        let width = f64::from(width);
        let height = f64::from(height);
        self.viewport
            .zoom_around(position.x / width, position.y / height, factor, height / width);
        self.lod.interact(now);
        self.redraw_requested = true;
    }
}

/// Targets that could not be allocated leave nothing to export; a failed
/// readback had an image that could not be turned into pixels.
fn export_error(err: &GpuPassError) -> RenderingError {
    match err {
        GpuPassError::ExceedsTextureLimit { .. }
        | GpuPassError::ExceedsBufferLimit { .. }
        | GpuPassError::Allocation(_) => RenderingError::NoImageAvailable,
        GpuPassError::Readback(_) | GpuPassError::FrameBuffer(_) => {
            RenderingError::ImageConversionFailed
        }
    }
}

impl RenderController for ContinuousRenderer {
    fn slot(&self) -> ControllerSlot {
        ControllerSlot::Continuous
    }

    fn start(&mut self, params: RenderParameters, signals: RenderSignals) -> StartOutcome {
        if self.has_rendered {
            return StartOutcome::AlreadyActive;
        }

        if self.gpu.is_none() {
            warn!("continuous: start ignored, renderer is disabled");
            signals.progress_sink().reset();
            signals.set_generating(false);
            return StartOutcome::Disabled;
        }

        signals.clear_cancel();
        self.signals = Some(signals.clone());
        self.viewport = params.viewport();
        self.iteration_depth = params.iteration_depth();

        if !self.targets_match(params.width(), params.height()) {
            self.surface_size = (params.width(), params.height());
            self.rebuild_targets();
        }

        if self.targets.is_none() {
            self.paused = true;
            signals.progress_sink().reset();
            signals.set_generating(false);
            return StartOutcome::Failed;
        }

        self.has_rendered = true;
        self.paused = false;
        self.lod.start();
        self.throttle.reset();
        self.redraw_requested = true;

        signals.set_generating(true);
        signals.progress_sink().set(1.0);

        info!(
            "continuous: started on {}x{} at depth {}",
            params.width(),
            params.height(),
            params.iteration_depth()
        );

        StartOutcome::Started
    }

    fn tick(&mut self, now: Instant) {
        if self.has_rendered && !self.should_continue() {
            self.end_session("cancelled");
            return;
        }

        if self.lod.poll(now) {
            debug!("continuous: settled, redrawing at full resolution");
            self.redraw_requested = true;
        }

        if self.redraw_requested {
            self.draw(now);
        }
    }

    fn has_rendered(&self) -> bool {
        self.has_rendered
    }

    fn snapshot(&mut self) -> Result<Arc<FrameBuffer>, RenderingError> {
        if !self.has_rendered || self.gpu.is_none() {
            return Err(RenderingError::NoImageAvailable);
        }

        let (width, height) = self.surface_size;
        if width == 0 || height == 0 {
            return Err(RenderingError::NoImageAvailable);
        }

        if !self.targets_match(width, height) {
            self.rebuild_targets();
        }

        self.render_full_resolution().map(Arc::new).map_err(|err| {
            error!("continuous: export render failed: {err}");
            export_error(&err)
        })
    }

    fn dispose(&mut self) {
        if let Some(signals) = &self.signals {
            signals.request_cancel();
        }

        self.end_session("disposed");
        self.paused = true;
        self.lod.dispose();
        self.wait_for_gpu();
    }

    fn preview(&mut self) -> Option<Arc<FrameBuffer>> {
        if !self.surface_fresh {
            return None;
        }
        self.surface_fresh = false;

        match self.read_surface() {
            Ok(frame) => frame.map(Arc::new),
            Err(err) => {
                warn!("continuous: surface readback failed: {err}");
                None
            }
        }
    }

    fn viewport_input(&mut self) -> Option<&mut dyn ViewportInput> {
        Some(self as &mut dyn ViewportInput)
    }
}

impl ViewportInput for ContinuousRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        if self.surface_size == (width, height) {
            return;
        }

        debug!("continuous: surface resized to {width}x{height}");
        self.paused = true;
        self.lod.settle_now();
        self.surface_size = (width, height);
        self.rebuild_targets();

        if self.has_rendered && width > 0 && height > 0 && self.targets.is_none() {
            self.end_session("render target allocation failed");
            return;
        }

        if self.targets.is_some() && self.should_continue() {
            self.paused = false;
            self.redraw_requested = true;
        }
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.drag_anchor = None;
        self.lod.settle_now();
        if self.should_continue() {
            self.redraw_requested = true;
        }
    }

    fn pointer_down(&mut self, position: ScreenPoint, now: Instant) {
        self.drag_anchor = Some(position);
        self.lod.interact(now);
        self.redraw_requested = true;
    }

    fn pointer_dragged(&mut self, position: ScreenPoint, now: Instant) {
        let Some(anchor) = self.drag_anchor.replace(position) else {
            return;
        };

        self.viewport
            .pan_by_pixels(position.x - anchor.x, position.y - anchor.y, self.surface_size.0);
        self.lod.interact(now);
        self.redraw_requested = true;
    }

    fn pointer_up(&mut self, now: Instant) {
        self.drag_anchor = None;
        self.lod.interact(now);
    }

    fn scroll(&mut self, position: ScreenPoint, delta_y: f64, now: Instant) {
        let factor = self.config.scroll_factor(delta_y);
        self.zoom_at(position, factor, now);
    }

    fn magnify(&mut self, position: ScreenPoint, magnification: f64, now: Instant) {
        let factor = self.config.magnify_factor(magnification);
        self.zoom_at(position, factor, now);
    }
}

impl Drop for ContinuousRenderer {
    fn drop(&mut self) {
        self.wait_for_gpu();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::core::data::complex::Complex;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn disabled() -> ContinuousRenderer {
        ContinuousRenderer::with_context(Err(GpuSetupError::NoAdapter), ContinuousConfig::default())
    }

    fn live() -> Option<ContinuousRenderer> {
        let renderer = ContinuousRenderer::new(ContinuousConfig::default());
        if renderer.is_disabled() {
            log::warn!("skipping continuous renderer test: no GPU");
            return None;
        }
        Some(renderer)
    }

    fn params(width: u32, height: u32) -> RenderParameters {
        RenderParameters::new(Viewport::new(Complex::new(-0.5, 0.0), 3.0), 20, width, height)
            .unwrap()
    }

    fn point(x: f64, y: f64) -> ScreenPoint {
        ScreenPoint { x, y }
    }

    #[test]
    fn disabled_renderer_refuses_to_start() {
        let mut renderer = disabled();
        let signals = RenderSignals::new();
        signals.set_generating(true);

        assert_eq!(renderer.start(params(64, 48), signals.clone()), StartOutcome::Disabled);
        assert!(!signals.is_generating());
        assert!(!renderer.has_rendered());
        assert_eq!(
            renderer.snapshot().unwrap_err(),
            RenderingError::NoImageAvailable
        );
    }

    #[test]
    fn drag_moves_the_view_with_the_pointer() {
        let mut renderer = disabled();
        renderer.resize(200, 100);
        let t0 = Instant::now();
        let before = renderer.viewport();

        renderer.pointer_down(point(50.0, 50.0), t0);
        renderer.pointer_dragged(point(70.0, 40.0), t0 + ms(10));
        renderer.pointer_up(t0 + ms(20));

        let after = renderer.viewport();
        let units_per_pixel = before.scale() * 2.0 / 200.0;
        assert!((after.center().real - (before.center().real - 20.0 * units_per_pixel)).abs() < 1e-12);
        assert!((after.center().imag - (before.center().imag + 10.0 * units_per_pixel)).abs() < 1e-12);
        assert_eq!(after.scale(), before.scale());
    }

    #[test]
    fn scroll_zooms_around_the_cursor() {
        let mut renderer = disabled();
        renderer.resize(400, 300);
        let cursor = point(300.0, 75.0);
        let before = renderer.viewport();
        let anchor = before.pixel_to_complex(cursor.x, cursor.y, 400, 300);

        renderer.scroll(cursor, 4.0, Instant::now());

        let after = renderer.viewport();
        let still_under_cursor = after.pixel_to_complex(cursor.x, cursor.y, 400, 300);
        assert!((after.scale() - before.scale() * 0.8).abs() < 1e-12);
        assert!((anchor.real - still_under_cursor.real).abs() < 1e-12);
        assert!((anchor.imag - still_under_cursor.imag).abs() < 1e-12);
    }

    #[test]
    fn input_switches_to_low_resolution_until_the_view_settles() {
        let mut renderer = disabled();
        renderer.resize(400, 300);
        let t0 = Instant::now();

        renderer.scroll(point(10.0, 10.0), 1.0, t0);
        assert_eq!(renderer.lod_state(), LodState::Interacting);

        renderer.magnify(point(10.0, 10.0), 0.1, t0 + ms(300));
        renderer.tick(t0 + ms(600));
        assert_eq!(renderer.lod_state(), LodState::Interacting);

        renderer.tick(t0 + ms(800));
        assert_eq!(renderer.lod_state(), LodState::Settled);
    }

    #[test]
    fn set_viewport_replaces_the_view_and_settles() {
        let mut renderer = disabled();
        renderer.resize(400, 300);
        let t0 = Instant::now();
        let home = renderer.viewport();

        renderer.pointer_down(point(100.0, 100.0), t0);
        renderer.pointer_dragged(point(150.0, 120.0), t0 + ms(10));
        renderer.scroll(point(200.0, 150.0), 3.0, t0 + ms(20));
        assert_ne!(renderer.viewport(), home);

        renderer.set_viewport(home);

        assert_eq!(renderer.viewport(), home);
        assert_eq!(renderer.lod_state(), LodState::Settled);
        renderer.pointer_dragged(point(300.0, 300.0), t0 + ms(30));
        assert_eq!(renderer.viewport(), home);
    }

    #[test]
    fn zoom_without_a_surface_is_ignored() {
        let mut renderer = disabled();
        let before = renderer.viewport();

        renderer.scroll(point(1.0, 1.0), 5.0, Instant::now());

        assert_eq!(renderer.viewport(), before);
    }

    #[test]
    fn draws_low_resolution_while_interacting_then_full_resolution() {
        let Some(mut renderer) = live() else {
            return;
        };
        let signals = RenderSignals::new();
        let t0 = Instant::now();

        assert_eq!(renderer.start(params(64, 48), signals.clone()), StartOutcome::Started);
        assert_eq!(signals.progress(), 1.0);

        renderer.tick(t0);
        assert_eq!(renderer.last_drawn_tier(), Some(RenderTier::FullResolution));

        renderer.pointer_down(point(10.0, 10.0), t0 + ms(20));
        renderer.pointer_dragged(point(20.0, 15.0), t0 + ms(40));
        renderer.tick(t0 + ms(40));
        assert_eq!(renderer.last_drawn_tier(), Some(RenderTier::LowResolution));

        renderer.pointer_up(t0 + ms(60));
        renderer.tick(t0 + ms(300));
        assert_eq!(renderer.last_drawn_tier(), Some(RenderTier::LowResolution));

        renderer.tick(t0 + ms(600));
        assert_eq!(renderer.lod_state(), LodState::Settled);
        assert_eq!(renderer.last_drawn_tier(), Some(RenderTier::FullResolution));
    }

    #[test]
    fn draws_closer_than_the_frame_interval_are_throttled() {
        let Some(mut renderer) = live() else {
            return;
        };
        let signals = RenderSignals::new();
        let t0 = Instant::now();
        renderer.start(params(32, 32), signals.clone());

        assert_eq!(renderer.draw(t0), DrawOutcome::Drawn(RenderTier::FullResolution));
        assert_eq!(renderer.draw(t0 + ms(5)), DrawOutcome::Throttled);
        assert!(renderer.wants_redraw());
        assert_eq!(renderer.draw(t0 + ms(20)), DrawOutcome::Drawn(RenderTier::FullResolution));
    }

    #[test]
    fn export_while_interacting_is_full_resolution() {
        let Some(mut renderer) = live() else {
            return;
        };
        let signals = RenderSignals::new();
        let t0 = Instant::now();
        renderer.start(params(64, 48), signals.clone());

        renderer.scroll(point(32.0, 24.0), 2.0, t0);
        renderer.tick(t0);
        assert_eq!(renderer.last_drawn_tier(), Some(RenderTier::LowResolution));

        let image = renderer.snapshot().unwrap();

        assert_eq!((image.width(), image.height()), (64, 48));
        assert_eq!(renderer.lod_state(), LodState::Interacting);
    }

    #[test]
    fn cancel_ends_the_redraw_chain_and_allows_a_fresh_start() {
        let Some(mut renderer) = live() else {
            return;
        };
        let signals = RenderSignals::new();
        let t0 = Instant::now();
        renderer.start(params(32, 32), signals.clone());
        renderer.tick(t0);

        signals.request_cancel();
        renderer.tick(t0 + ms(20));

        assert!(!renderer.has_rendered());
        assert!(!signals.is_generating());
        assert_eq!(signals.progress(), 0.0);
        assert!(!renderer.wants_redraw());

        assert_eq!(renderer.start(params(32, 32), signals.clone()), StartOutcome::Started);
    }

    #[test]
    fn resize_rebuilds_targets_and_export_follows_the_new_size() {
        let Some(mut renderer) = live() else {
            return;
        };
        let signals = RenderSignals::new();
        renderer.start(params(32, 32), signals.clone());

        renderer.resize(48, 40);

        assert!(!renderer.is_paused());
        let image = renderer.snapshot().unwrap();
        assert_eq!((image.width(), image.height()), (48, 40));
    }

    #[test]
    fn zero_sized_surface_pauses_drawing() {
        let Some(mut renderer) = live() else {
            return;
        };
        let signals = RenderSignals::new();
        renderer.start(params(32, 32), signals.clone());

        renderer.resize(0, 0);

        assert!(renderer.is_paused());
        assert_eq!(renderer.draw(Instant::now()), DrawOutcome::Skipped);
        assert_eq!(
            renderer.snapshot().unwrap_err(),
            RenderingError::NoImageAvailable
        );
    }

    #[test]
    fn failed_target_allocation_on_resize_ends_the_session() {
        let Some(mut renderer) = live() else {
            return;
        };
        let signals = RenderSignals::new();
        let t0 = Instant::now();
        renderer.start(params(32, 32), signals.clone());
        renderer.tick(t0);

        let limit = renderer
            .gpu
            .as_ref()
            .map(|gpu| gpu.context.max_texture_side())
            .unwrap();
        renderer.resize(limit + 1, 16);
        for i in 1..=50 {
            renderer.tick(t0 + ms(20 * i));
        }

        assert!(!signals.is_generating());
        assert_eq!(signals.progress(), 0.0);
        assert!(!renderer.has_rendered());
        assert!(!renderer.wants_redraw());

        renderer.resize(32, 32);
        assert_eq!(renderer.start(params(32, 32), signals.clone()), StartOutcome::Started);
    }

    #[test]
    fn export_errors_separate_missing_targets_from_failed_readback() {
        assert_eq!(
            export_error(&GpuPassError::ExceedsTextureLimit {
                width: 9000,
                height: 10,
                limit: 8192,
            }),
            RenderingError::NoImageAvailable
        );
        assert_eq!(
            export_error(&GpuPassError::Allocation("out of memory".into())),
            RenderingError::NoImageAvailable
        );
        assert_eq!(
            export_error(&GpuPassError::Readback("buffer mapping failed".into())),
            RenderingError::ImageConversionFailed
        );
    }

    #[test]
    fn preview_hands_out_each_drawn_surface_once() {
        let Some(mut renderer) = live() else { return };
        let t0 = Instant::now();
        renderer.start(params(40, 30), RenderSignals::new());

        assert!(renderer.preview().is_none());

        renderer.tick(t0);
        let frame = renderer.preview().unwrap();
        assert_eq!((frame.width(), frame.height()), (40, 30));
        assert!(renderer.preview().is_none());
    }

    #[test]
    fn dispose_pauses_and_ignores_further_input() {
        let Some(mut renderer) = live() else {
            return;
        };
        let signals = RenderSignals::new();
        renderer.start(params(32, 32), signals.clone());

        renderer.dispose();

        assert!(!renderer.has_rendered());
        assert!(renderer.is_paused());
        assert!(signals.is_cancel_requested());
        assert_eq!(renderer.lod_state(), LodState::Disposed);

        renderer.scroll(point(5.0, 5.0), 1.0, Instant::now());
        assert_eq!(renderer.lod_state(), LodState::Disposed);
    }
}
