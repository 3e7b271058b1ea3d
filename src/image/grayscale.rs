use super::{LuminanceImage, RgbImage};

/// Converts every dot to its weighted luminance.
///
/// An image without dots yields an empty luminance image of the same size.
pub fn to_grayscale(image: &RgbImage) -> LuminanceImage {
    log::trace!(
        "Converting {}x{} image to grayscale",
        image.width(),
        image.height()
    );
    image.map(|dot| dot.luminance())
}
