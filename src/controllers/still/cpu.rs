use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use crate::controllers::data::render_request::ControllerSlot;
use crate::controllers::data::render_signals::RenderSignals;
use crate::controllers::errors::rendering::RenderingError;
use crate::controllers::events::pass_event::AbortReason;
use crate::controllers::ports::render_controller::{RenderController, StartOutcome};
use crate::controllers::still::pass_session::PassSession;
use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::rasterize::rasterize_row_groups::{RasterizeError, rasterize_row_groups};
use crate::core::data::frame_buffer::FrameBuffer;
use crate::core::data::render_params::RenderParameters;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::util::row_group_size::rows_per_group_for_this_machine;

/// Still images on the CPU, row group by row group across the rayon pool.
pub struct CpuRasterizer {
    session: PassSession,
    rows_per_group: NonZeroUsize,
}

impl Default for CpuRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuRasterizer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rows_per_group(rows_per_group_for_this_machine())
    }

    #[must_use]
    pub fn with_rows_per_group(rows_per_group: NonZeroUsize) -> Self {
        Self {
            session: PassSession::new("cpu"),
            rows_per_group,
        }
    }
}

fn render_pass(
    params: &RenderParameters,
    signals: &RenderSignals,
    rows_per_group: NonZeroUsize,
) -> Result<FrameBuffer, AbortReason> {
    let algorithm = MandelbrotAlgorithm::new(params);
    let cancel = signals.cancel_token();
    let progress = signals.progress_sink();
    let height = f64::from(params.height());

    let frame = rasterize_row_groups(
        params.width(),
        params.height(),
        rows_per_group,
        &algorithm,
        cancel,
        |rows_done| progress.advance_to(f64::from(rows_done) / height),
    )
    .map_err(|err| match err {
        RasterizeError::Cancelled(_) => AbortReason::Cancelled,
        other => AbortReason::Failed(other.to_string()),
    })?;

    if cancel.is_cancelled() {
        return Err(AbortReason::Cancelled);
    }

    Ok(frame)
}

impl RenderController for CpuRasterizer {
    fn slot(&self) -> ControllerSlot {
        ControllerSlot::Cpu
    }

    fn start(&mut self, params: RenderParameters, signals: RenderSignals) -> StartOutcome {
        let rows_per_group = self.rows_per_group;
        self.session.start(params, signals, move |params, signals| {
            render_pass(params, signals, rows_per_group)
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    use crate::core::data::complex::Complex;
    use crate::core::data::point::Point;
    use crate::core::data::viewport::Viewport;

    fn params(side: u32) -> RenderParameters {
        RenderParameters::new(Viewport::new(Complex::new(-0.5, 0.0), 2.0), 20, side, side)
            .unwrap()
    }

    fn wait_for_idle(controller: &mut CpuRasterizer, signals: &RenderSignals, timeout: Duration) {
        let start = Instant::now();
        loop {
            controller.tick(Instant::now());
            if !signals.is_generating() || start.elapsed() >= timeout {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_completed_pass_publishes_image_and_full_progress() {
        let mut controller = CpuRasterizer::with_rows_per_group(NonZeroUsize::new(4).unwrap());
        let signals = RenderSignals::new();

        assert_eq!(controller.start(params(32), signals.clone()), StartOutcome::Started);
        wait_for_idle(&mut controller, &signals, Duration::from_secs(5));

        assert!(!signals.is_generating());
        assert_eq!(signals.progress(), 1.0);
        assert!(controller.has_rendered());

        let image = controller.snapshot().unwrap();
        assert_eq!((image.width(), image.height()), (32, 32));
        assert_eq!(
            image.pixel(Point { x: 16, y: 16 }).map(|c| c.to_rgba()),
            Some([0, 0, 0, 255])
        );
    }

    #[test]
    fn test_second_start_while_active_is_a_no_op() {
        let mut controller = CpuRasterizer::new();
        let signals = RenderSignals::new();

        controller.start(params(16), signals.clone());
        assert_eq!(
            controller.start(params(16), signals.clone()),
            StartOutcome::AlreadyActive
        );

        wait_for_idle(&mut controller, &signals, Duration::from_secs(5));
        assert_eq!(
            controller.start(params(16), signals.clone()),
            StartOutcome::AlreadyActive
        );
    }

    #[test]
    fn test_cancelled_pass_looks_like_never_started_then_restarts() {
        let mut controller = CpuRasterizer::with_rows_per_group(NonZeroUsize::new(1).unwrap());
        let signals = RenderSignals::new();

        controller.start(params(512), signals.clone());
        signals.request_cancel();
        wait_for_idle(&mut controller, &signals, Duration::from_secs(10));

        assert!(!signals.is_generating());
        assert_eq!(signals.progress(), 0.0);
        assert!(!controller.has_rendered());
        assert_eq!(
            controller.snapshot().unwrap_err(),
            RenderingError::NoImageAvailable
        );

        assert_eq!(controller.start(params(24), signals.clone()), StartOutcome::Started);
        wait_for_idle(&mut controller, &signals, Duration::from_secs(5));

        assert_eq!(signals.progress(), 1.0);
        assert!(controller.snapshot().is_ok());
    }

    #[test]
    fn test_progress_never_decreases_during_a_pass() {
        let mut controller = CpuRasterizer::with_rows_per_group(NonZeroUsize::new(1).unwrap());
        let signals = RenderSignals::new();
        controller.start(params(96), signals.clone());

        let mut last = 0.0;
        let start = Instant::now();
        while signals.is_generating() && start.elapsed() < Duration::from_secs(5) {
            let now = signals.progress();
            assert!(now >= last, "progress went from {last} to {now}");
            last = now;
            controller.tick(Instant::now());
        }

        assert_eq!(signals.progress(), 1.0);
    }

    #[test]
    fn test_same_parameters_give_identical_images() {
        let signals = RenderSignals::new();
        let mut a = CpuRasterizer::with_rows_per_group(NonZeroUsize::new(1).unwrap());
        let mut b = CpuRasterizer::with_rows_per_group(NonZeroUsize::new(5).unwrap());

        a.start(params(40), signals.clone());
        wait_for_idle(&mut a, &signals, Duration::from_secs(5));
        b.start(params(40), signals.clone());
        wait_for_idle(&mut b, &signals, Duration::from_secs(5));

        assert_eq!(a.snapshot().unwrap(), b.snapshot().unwrap());
    }

    #[test]
    fn test_dispose_forgets_the_image() {
        let mut controller = CpuRasterizer::new();
        let signals = RenderSignals::new();
        controller.start(params(16), signals.clone());
        wait_for_idle(&mut controller, &signals, Duration::from_secs(5));

        controller.dispose();

        assert!(!controller.has_rendered());
        assert!(signals.is_cancel_requested());
        assert!(controller.snapshot().is_err());
    }
}
