use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use log::info;

use crate::controllers::coordinator::RendererCoordinator;
use crate::controllers::data::render_request::{GenerationMode, RenderRequest, RenderStrategy};
use crate::controllers::data::render_signals::RenderSignals;
use crate::controllers::export::save_image;
use crate::controllers::ports::render_controller::{RenderController, StartOutcome};
use crate::controllers::still::cpu::CpuRasterizer;
use crate::controllers::still::gpu::GpuRasterizer;
use crate::core::util::target_resolution::ResolutionPolicy;
use crate::input::cli::args::CliArgs;
use crate::presenters::file::png::PngFilePresenter;

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const PROGRESS_LOG_INTERVAL: Duration = Duration::from_secs(1);

/// Renders one still image as described by `args` and writes it as PNG.
pub fn run_cli(args: &CliArgs) -> anyhow::Result<()> {
    let strategy = RenderStrategy::from(args.strategy);
    let controller: Box<dyn RenderController> = match strategy {
        RenderStrategy::Cpu => Box::new(CpuRasterizer::new()),
        RenderStrategy::Gpu => Box::new(GpuRasterizer::new()),
    };

    let mut coordinator = RendererCoordinator::new();
    coordinator.register(controller);

    let request = RenderRequest {
        strategy,
        mode: GenerationMode::StillImage,
        iteration_depth: args.iterations,
        viewport_size: (0, 0),
        still_side: args.size,
    };
    let params = request
        .resolve(&args.config(), &ResolutionPolicy::default())
        .context("invalid render parameters")?;

    info!(
        "rendering {}x{} at depth {} with the {} strategy",
        params.width(),
        params.height(),
        params.iteration_depth(),
        request.slot().name()
    );

    let signals = RenderSignals::new();
    signals.set_generating(true);
    match coordinator.dispatch_start(request.slot(), params, &signals)? {
        Some(StartOutcome::Started) => {}
        Some(StartOutcome::Disabled) => bail!("the {} renderer is unavailable", request.slot().name()),
        outcome => bail!("render did not start: {outcome:?}"),
    }

    let started = Instant::now();
    let mut last_log = started;
    while signals.is_generating() {
        thread::sleep(POLL_INTERVAL);
        coordinator.tick(Instant::now());

        if last_log.elapsed() >= PROGRESS_LOG_INTERVAL {
            info!("progress {:.0}%", signals.progress() * 100.0);
            last_log = Instant::now();
        }
    }

    save_image(
        &mut coordinator,
        strategy,
        GenerationMode::StillImage,
        &PngFilePresenter::new(),
        &args.output,
    )
    .context("render did not produce an image")?;

    info!("done in {} ms", started.elapsed().as_millis());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cpu_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("small.png");
        let args = CliArgs::try_parse_from([
            "mandelbrot",
            "--size",
            "32",
            "--iterations",
            "30",
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();

        run_cli(&args).unwrap();

        let image = image::open(&output).unwrap();
        assert_eq!((image.width(), image.height()), (32, 32));
    }
}
