use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::controllers::ports::image_sink::{ImageSinkError, ImageSinkPort};
use crate::core::data::frame_buffer::FrameBuffer;

/// Writes frames to disk as PNG.
#[derive(Debug, Default)]
pub struct PngFilePresenter {}

impl PngFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl ImageSinkPort for PngFilePresenter {
    fn present(&self, frame: &FrameBuffer, filepath: &Path) -> Result<(), ImageSinkError> {
        let image = RgbaImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or(ImageSinkError::Conversion {
                width: frame.width(),
                height: frame.height(),
                len: frame.data().len(),
            })?;

        if let Some(parent) = filepath.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ImageSinkError::Write(e.to_string()))?;
        }

        image
            .save_with_format(filepath, ImageFormat::Png)
            .map_err(|e| ImageSinkError::Write(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::point::Point;

    #[test]
    fn writes_a_png_that_decodes_to_the_same_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mandelbrot.png");
        let mut frame = FrameBuffer::new(3, 2);
        let red = Colour { r: 255, g: 0, b: 0, a: 255 };
        frame.set_pixel(Point { x: 2, y: 1 }, red).unwrap();

        PngFilePresenter::new().present(&frame, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [255, 0, 0, 255]);
        assert_eq!(decoded.as_raw().as_slice(), frame.data());
    }

    #[test]
    fn unwritable_path_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be overwritten by a file
        let result = PngFilePresenter::new().present(&FrameBuffer::new(1, 1), dir.path());

        assert!(matches!(result, Err(ImageSinkError::Write(_))));
    }
}
