use crate::core::data::complex::Complex;
use crate::core::data::viewport::Viewport;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderParametersError {
    #[error("iteration depth must be greater than zero")]
    ZeroIterationDepth,
    #[error("output size {width}x{height} must be non-zero in both dimensions")]
    ZeroSize { width: u32, height: u32 },
}

/// Everything a rasterizer needs to produce one image.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderParameters {
    viewport: Viewport,
    iteration_depth: u32,
    width: u32,
    height: u32,
}

impl RenderParameters {
    pub fn new(
        viewport: Viewport,
        iteration_depth: u32,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderParametersError> {
        if iteration_depth == 0 {
            return Err(RenderParametersError::ZeroIterationDepth);
        }

        if width == 0 || height == 0 {
            return Err(RenderParametersError::ZeroSize { width, height });
        }

        Ok(Self {
            viewport,
            iteration_depth,
            width,
            height,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        self.viewport.center()
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    #[must_use]
    pub fn iteration_depth(&self) -> u32 {
        self.iteration_depth
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `height / width`, the vertical stretch applied by the viewport.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }
}
