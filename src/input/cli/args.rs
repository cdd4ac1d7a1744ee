use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::controllers::data::render_request::RenderStrategy;
use crate::controllers::export::DEFAULT_FILE_NAME;
use crate::core::data::complex::Complex;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::mandelbrot_config::{DEFAULT_ITERATION_DEPTH, MandelbrotConfig};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Cpu,
    Gpu,
}

impl From<StrategyArg> for RenderStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Cpu => RenderStrategy::Cpu,
            StrategyArg::Gpu => RenderStrategy::Gpu,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "mandelbrot", version, about = "Render a Mandelbrot still image to PNG")]
pub struct CliArgs {
    #[arg(long, value_enum, default_value_t = StrategyArg::Cpu)]
    pub strategy: StrategyArg,

    /// Maximum iteration depth. Also drives the output resolution unless --size is given.
    #[arg(long, default_value_t = DEFAULT_ITERATION_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub iterations: u32,

    #[arg(long, default_value_t = -0.5, allow_negative_numbers = true)]
    pub center_x: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub center_y: f64,

    /// Half-width of the view in the complex plane.
    #[arg(long, default_value_t = 2.0)]
    pub scale: f64,

    /// Side of the square output in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub size: Option<u32>,

    #[arg(long, default_value = DEFAULT_FILE_NAME)]
    pub output: PathBuf,
}

impl CliArgs {
    #[must_use]
    pub fn config(&self) -> MandelbrotConfig {
        MandelbrotConfig {
            still_viewport: Viewport::new(Complex::new(self.center_x, self.center_y), self.scale),
            iteration_depth: self.iterations,
            ..MandelbrotConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_default_still_view() {
        let args = CliArgs::try_parse_from(["mandelbrot"]).unwrap();

        assert_eq!(args.strategy, StrategyArg::Cpu);
        assert_eq!(args.iterations, 20);
        assert_eq!(args.size, None);
        assert_eq!(args.output, PathBuf::from("mandelbrot.png"));
        assert_eq!(args.config(), MandelbrotConfig::default());
    }

    #[test]
    fn test_parses_view_and_output() {
        let args = CliArgs::try_parse_from([
            "mandelbrot",
            "--strategy",
            "gpu",
            "--iterations",
            "150",
            "--center-x",
            "-0.75",
            "--center-y",
            "0.1",
            "--scale",
            "0.25",
            "--size",
            "512",
            "--output",
            "out/view.png",
        ])
        .unwrap();

        assert_eq!(RenderStrategy::from(args.strategy), RenderStrategy::Gpu);
        assert_eq!(args.size, Some(512));
        let config = args.config();
        assert_eq!(config.still_viewport.center(), Complex::new(-0.75, 0.1));
        assert_eq!(config.still_viewport.scale(), 0.25);
        assert_eq!(config.iteration_depth, 150);
    }

    #[test]
    fn test_zero_iterations_are_rejected() {
        assert!(CliArgs::try_parse_from(["mandelbrot", "--iterations", "0"]).is_err());
        assert!(CliArgs::try_parse_from(["mandelbrot", "--size", "0"]).is_err());
    }
}
