use std::path::Path;

use log::{error, info};

use crate::controllers::coordinator::RendererCoordinator;
use crate::controllers::data::render_request::{GenerationMode, RenderStrategy};
use crate::controllers::errors::rendering::RenderingError;
use crate::controllers::ports::image_sink::ImageSinkPort;

pub const DEFAULT_FILE_NAME: &str = "mandelbrot.png";

/// Saves the image of the controller serving `(strategy, mode)` through `sink`.
///
/// Continuous mode exports a full-resolution render of the current view even
/// while the user is interacting. Still modes export the last completed pass.
pub fn save_image<S: ImageSinkPort>(
    coordinator: &mut RendererCoordinator,
    strategy: RenderStrategy,
    mode: GenerationMode,
    sink: &S,
    filepath: &Path,
) -> Result<(), RenderingError> {
    let result = coordinator
        .resolve(strategy, mode)
        .and_then(|controller| controller.snapshot())
        .and_then(|frame| {
            sink.present(&frame, filepath)
                .map_err(RenderingError::from)
                .map(|()| frame)
        });

    match result {
        Ok(frame) => {
            info!(
                "saved {}x{} image to {}",
                frame.width(),
                frame.height(),
                filepath.display()
            );
            Ok(())
        }
        Err(err) => {
            error!("image export failed: {err}");
            Err(err)
        }
    }
}
