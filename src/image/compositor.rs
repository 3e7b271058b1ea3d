use super::{mask::Mask, Image, RgbImage};
use crate::color::RGBColorFormat;

/// Keeps the source dots selected by `mask` and blacks out the rest.
///
/// Fails before producing any output if the sizes differ.
pub fn apply_mask(source: &RgbImage, mask: &Mask) -> crate::Result<RgbImage> {
    source.check_same_dimensions(mask.image())?;

    log::debug!(
        "Applying mask to {}x{} image",
        source.width(),
        source.height()
    );

    Ok(Image::from_fn(source.width(), source.height(), |x, y| {
        if mask.is_selected(x, y) {
            *source.dot(x, y)
        } else {
            RGBColorFormat::BLACK
        }
    }))
}
