use std::num::NonZeroUsize;

use rayon::prelude::*;

use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled};
use crate::core::actions::rasterize::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::colour::Colour;
use crate::core::data::frame_buffer::{BYTES_PER_PIXEL, FrameBuffer, FrameBufferError};
use crate::core::data::point::Point;

#[derive(Debug, thiserror::Error)]
pub enum RasterizeError<E> {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("algorithm error: {0}")]
    Algorithm(E),
    #[error("could not allocate {bytes} bytes for a {width}x{height} frame")]
    Allocation { width: u32, height: u32, bytes: usize },
    #[error(transparent)]
    FrameBuffer(#[from] FrameBufferError),
}

/// Rasterizes a `width × height` frame in horizontal groups of rows.
///
/// Groups run one after another; the pixels inside a group are spread across
/// the rayon pool. Cancellation is checked before every group and every
/// [`CANCEL_CHECK_INTERVAL_PIXELS`] pixels inside one. After each group
/// `on_group_done` receives the number of rows finished so far, so callers
/// can publish progress as `rows_done / height`.
pub fn rasterize_row_groups<Alg, C, P>(
    width: u32,
    height: u32,
    rows_per_group: NonZeroUsize,
    algorithm: &Alg,
    cancel: &C,
    mut on_group_done: P,
) -> Result<FrameBuffer, RasterizeError<Alg::Failure>>
where
    Alg: FractalAlgorithm<Success = Colour> + Sync,
    Alg::Failure: Send,
    C: CancelToken,
    P: FnMut(u32),
{
    let row_bytes = width as usize * BYTES_PER_PIXEL;
    let total_bytes = row_bytes * height as usize;

    let mut data: Vec<u8> = Vec::new();
    data.try_reserve_exact(total_bytes)
        .map_err(|_| RasterizeError::Allocation {
            width,
            height,
            bytes: total_bytes,
        })?;
    data.resize(total_bytes, 0);

    let group_bytes = row_bytes * rows_per_group.get();

    if group_bytes > 0 {
        for (group_index, group) in data.chunks_mut(group_bytes).enumerate() {
            if cancel.is_cancelled() {
                return Err(RasterizeError::Cancelled(Cancelled));
            }

            let first_row = group_index * rows_per_group.get();

            group
                .par_chunks_mut(BYTES_PER_PIXEL)
                .enumerate()
                .try_for_each(|(i, pixel_bytes)| {
                    if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
                        return Err(RasterizeError::Cancelled(Cancelled));
                    }

                    let pixel = Point {
                        x: (i % width as usize) as u32,
                        y: (first_row + i / width as usize) as u32,
                    };
                    let colour = algorithm
                        .compute(pixel)
                        .map_err(RasterizeError::Algorithm)?;
                    pixel_bytes.copy_from_slice(&colour.to_rgba());

                    Ok(())
                })?;

            let rows_done = first_row + group.len() / row_bytes;
            on_group_done(rows_done as u32);
        }
    }

    Ok(FrameBuffer::from_data(width, height, data)?)
}
