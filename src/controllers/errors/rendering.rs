use crate::controllers::data::render_request::ControllerSlot;
use crate::controllers::ports::image_sink::ImageSinkError;

/// Errors surfaced to the user. Each one is shown as a blocking notification.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderingError {
    #[error("failed to access the rendering controller.")]
    ControllerUnavailable { slot: ControllerSlot },
    #[error("no image available to save. ensure rendering is complete.")]
    NoImageAvailable,
    #[error("failed to convert the image to png.")]
    ImageConversionFailed,
    #[error("failed to save image: {0}")]
    SaveFailed(String),
}

impl From<ImageSinkError> for RenderingError {
    fn from(err: ImageSinkError) -> Self {
        match err {
            ImageSinkError::Conversion { .. } => Self::ImageConversionFailed,
            ImageSinkError::Write(reason) => Self::SaveFailed(reason),
        }
    }
}
