use crate::core::data::render_params::{RenderParameters, RenderParametersError};
use crate::core::fractals::mandelbrot::mandelbrot_config::MandelbrotConfig;
use crate::core::util::target_resolution::ResolutionPolicy;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum RenderStrategy {
    #[default]
    Cpu,
    Gpu,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum GenerationMode {
    #[default]
    StillImage,
    Continuous,
}

/// The three kinds of controller the coordinator can hold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ControllerSlot {
    Cpu,
    GpuOneShot,
    Continuous,
}

impl ControllerSlot {
    pub const ALL: [ControllerSlot; 3] = [Self::Cpu, Self::GpuOneShot, Self::Continuous];

    /// Continuous mode always runs on the GPU, whatever strategy is selected.
    #[must_use]
    pub fn resolve(strategy: RenderStrategy, mode: GenerationMode) -> Self {
        match (strategy, mode) {
            (_, GenerationMode::Continuous) => Self::Continuous,
            (RenderStrategy::Cpu, GenerationMode::StillImage) => Self::Cpu,
            (RenderStrategy::Gpu, GenerationMode::StillImage) => Self::GpuOneShot,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::GpuOneShot => "gpu",
            Self::Continuous => "continuous",
        }
    }
}

/// What the UI asks for when the user presses generate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderRequest {
    pub strategy: RenderStrategy,
    pub mode: GenerationMode,
    pub iteration_depth: u32,
    /// Drawable size of the view, used by continuous mode.
    pub viewport_size: (u32, u32),
    /// Overrides the resolution policy for still images.
    pub still_side: Option<u32>,
}

impl RenderRequest {
    #[must_use]
    pub fn slot(&self) -> ControllerSlot {
        ControllerSlot::resolve(self.strategy, self.mode)
    }

    pub fn resolve(
        &self,
        config: &MandelbrotConfig,
        policy: &ResolutionPolicy,
    ) -> Result<RenderParameters, RenderParametersError> {
        match self.mode {
            GenerationMode::StillImage => {
                let side = self
                    .still_side
                    .unwrap_or_else(|| policy.target_side(self.iteration_depth));
                RenderParameters::new(config.still_viewport, self.iteration_depth, side, side)
            }
            GenerationMode::Continuous => RenderParameters::new(
                config.continuous_viewport,
                self.iteration_depth,
                self.viewport_size.0,
                self.viewport_size.1,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(strategy: RenderStrategy, mode: GenerationMode) -> RenderRequest {
        RenderRequest {
            strategy,
            mode,
            iteration_depth: 20,
            viewport_size: (800, 600),
            still_side: None,
        }
    }

    #[test]
    fn test_slot_resolution_table() {
        use GenerationMode::*;
        use RenderStrategy::*;

        assert_eq!(ControllerSlot::resolve(Cpu, StillImage), ControllerSlot::Cpu);
        assert_eq!(ControllerSlot::resolve(Gpu, StillImage), ControllerSlot::GpuOneShot);
        assert_eq!(ControllerSlot::resolve(Cpu, Continuous), ControllerSlot::Continuous);
        assert_eq!(ControllerSlot::resolve(Gpu, Continuous), ControllerSlot::Continuous);
    }

    #[test]
    fn test_still_request_uses_resolution_policy() {
        let params = request(RenderStrategy::Cpu, GenerationMode::StillImage)
            .resolve(&MandelbrotConfig::default(), &ResolutionPolicy::default())
            .unwrap();

        assert_eq!((params.width(), params.height()), (4096, 4096));
        assert_eq!(params.scale(), 2.0);
    }

    #[test]
    fn test_still_side_override() {
        let mut req = request(RenderStrategy::Gpu, GenerationMode::StillImage);
        req.still_side = Some(64);
        let params = req
            .resolve(&MandelbrotConfig::default(), &ResolutionPolicy::default())
            .unwrap();

        assert_eq!((params.width(), params.height()), (64, 64));
    }

    #[test]
    fn test_continuous_request_uses_viewport_size() {
        let params = request(RenderStrategy::Cpu, GenerationMode::Continuous)
            .resolve(&MandelbrotConfig::default(), &ResolutionPolicy::default())
            .unwrap();

        assert_eq!((params.width(), params.height()), (800, 600));
        assert_eq!(params.scale(), 3.0);
    }

    #[test]
    fn test_zero_iteration_depth_is_rejected() {
        let mut req = request(RenderStrategy::Cpu, GenerationMode::StillImage);
        req.iteration_depth = 0;

        assert!(
            req.resolve(&MandelbrotConfig::default(), &ResolutionPolicy::default())
                .is_err()
        );
    }
}
