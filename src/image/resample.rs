use super::Image;
use crate::error::Error;

/// Resizes `image` to exactly `width` x `height` with nearest neighbour sampling.
///
/// Each target dot takes the source dot whose centre lies closest to its own
/// centre. A zero-sized target yields an empty image. A zero-sized source
/// cannot fill a non-empty target and fails with
/// [`Error::CannotResampleEmptyImage`].
pub fn resize<T: Copy>(image: &Image<T>, width: u32, height: u32) -> crate::Result<Image<T>> {
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }
    let target_is_empty = width == 0 || height == 0;
    if image.is_empty() && !target_is_empty {
        return Err(Error::CannotResampleEmptyImage);
    }

    log::debug!(
        "Resampling {}x{} image to {}x{}",
        image.width(),
        image.height(),
        width,
        height
    );

    Ok(Image::from_fn(width, height, |x, y| {
        let source_column = nearest_source_index(x, width, image.width());
        let source_row = nearest_source_index(y, height, image.height());
        *image.dot(source_column, source_row)
    }))
}

fn nearest_source_index(target_index: u32, target_length: u32, source_length: u32) -> u32 {
    let centre = (2 * target_index as u64 + 1) * source_length as u64;
    let index = centre / (2 * target_length as u64);
    index.min(source_length as u64 - 1) as u32
}
