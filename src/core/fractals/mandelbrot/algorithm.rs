use std::convert::Infallible;

use crate::core::actions::rasterize::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::colour::Colour;
use crate::core::data::point::Point;
use crate::core::data::render_params::RenderParameters;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::colour_map::SmoothHsvColourMap;
use crate::core::fractals::mandelbrot::escape_time::escape_time;

/// Colours one pixel of a Mandelbrot raster: transform, iterate, map.
#[derive(Debug, Clone)]
pub struct MandelbrotAlgorithm {
    viewport: Viewport,
    width: u32,
    height: u32,
    max_iterations: u32,
    colour_map: SmoothHsvColourMap,
}

impl MandelbrotAlgorithm {
    #[must_use]
    pub fn new(params: &RenderParameters) -> Self {
        Self {
            viewport: params.viewport(),
            width: params.width(),
            height: params.height(),
            max_iterations: params.iteration_depth(),
            colour_map: SmoothHsvColourMap::new(params.iteration_depth()),
        }
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Success = Colour;
    type Failure = Infallible;

    fn compute(&self, pixel: Point) -> Result<Colour, Infallible> {
        let c = self.viewport.pixel_to_complex(
            f64::from(pixel.x),
            f64::from(pixel.y),
            self.width,
            self.height,
        );

        Ok(self.colour_map.map(escape_time(c, self.max_iterations)))
    }
}
