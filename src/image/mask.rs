//! Binary foreground masks built by static background subtraction.
//!
//! A mask dot is [`MASK_MAX`] where the foreground shot differs from the
//! background shot by more than the threshold, and [`MASK_MIN`] everywhere
//! else. Isolated noise dots are kept as they are.

use super::{Image, LuminanceImage, RgbImage};
use crate::color::RGBColorFormat;

pub const MASK_MIN: u8 = 0;
pub const MASK_MAX: u8 = u8::MAX;

pub const DEFAULT_THRESHOLD: u8 = 30;

/// A single channel image whose dots are either [`MASK_MIN`] or [`MASK_MAX`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    image: Image<u8>,
}

impl Mask {
    /// A mask with every dot selected (`true`) or deselected (`false`).
    pub fn filled(width: u32, height: u32, selected: bool) -> Self {
        let value = if selected { MASK_MAX } else { MASK_MIN };
        Mask {
            image: Image::from_fn(width, height, |_, _| value),
        }
    }

    pub fn image(&self) -> &Image<u8> {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn is_selected(&self, column_index: u32, row_index: u32) -> bool {
        *self.image.dot(column_index, row_index) == MASK_MAX
    }

    pub fn foreground_pixel_count(&self) -> usize {
        self.image
            .dots()
            .iter()
            .filter(|&&value| value == MASK_MAX)
            .count()
    }

    /// Share of selected dots in `0.0..=1.0`; an empty mask has no coverage.
    pub fn coverage(&self) -> f64 {
        if self.image.is_empty() {
            return 0.0;
        }
        self.foreground_pixel_count() as f64 / self.image.dots().len() as f64
    }

    /// Replicates the mask value across all three color channels for display.
    pub fn to_rgb(&self) -> RgbImage {
        self.image.map(|&value| RGBColorFormat::from_luminance(value))
    }
}

/// Selects every dot whose luminance differs by strictly more than `threshold`.
pub fn generate_mask(
    foreground: &LuminanceImage,
    background: &LuminanceImage,
    threshold: u8,
) -> crate::Result<Mask> {
    foreground.check_same_dimensions(background)?;

    log::debug!(
        "Generating {}x{} mask with threshold {}",
        foreground.width(),
        foreground.height(),
        threshold
    );

    let image = Image::from_fn(foreground.width(), foreground.height(), |x, y| {
        let difference = foreground.dot(x, y).abs_diff(*background.dot(x, y));
        if difference > threshold {
            MASK_MAX
        } else {
            MASK_MIN
        }
    });
    Ok(Mask { image })
}

#[cfg(test)]
mod test {
    use super::{generate_mask, Mask, DEFAULT_THRESHOLD, MASK_MAX, MASK_MIN};
    use crate::color::RGBColorFormat;
    use crate::error::Error;
    use crate::image::Image;

    fn single_dot(value: u8) -> Image<u8> {
        Image::new(1, 1, vec![value]).unwrap()
    }

    #[test]
    fn difference_equal_to_threshold_is_background() {
        let mask = generate_mask(&single_dot(100), &single_dot(70), DEFAULT_THRESHOLD).unwrap();
        assert_eq!(mask.image().dots(), &[MASK_MIN]);
    }

    #[test]
    fn difference_above_threshold_is_foreground() {
        let mask = generate_mask(&single_dot(101), &single_dot(70), DEFAULT_THRESHOLD).unwrap();
        assert_eq!(mask.image().dots(), &[MASK_MAX]);
    }

    #[test]
    fn darker_foreground_is_selected_too() {
        let mask = generate_mask(&single_dot(70), &single_dot(101), DEFAULT_THRESHOLD).unwrap();
        assert_eq!(mask.image().dots(), &[MASK_MAX]);
    }

    #[test]
    fn custom_threshold() {
        let foreground = Image::new(3, 1, vec![10, 15, 16]).unwrap();
        let background = Image::new(3, 1, vec![10, 10, 10]).unwrap();
        let mask = generate_mask(&foreground, &background, 5).unwrap();
        assert_eq!(mask.image().dots(), &[MASK_MIN, MASK_MIN, MASK_MAX]);
    }

    #[test]
    fn maximum_threshold_selects_nothing() {
        let mask = generate_mask(&single_dot(255), &single_dot(0), u8::MAX).unwrap();
        assert_eq!(mask.foreground_pixel_count(), 0);
    }

    #[test]
    fn isolated_noise_is_kept() {
        #[rustfmt::skip]
        let foreground = Image::new(3, 3, vec![
            0,   0, 0,
            0, 200, 0,
            0,   0, 0,
        ]).unwrap();
        let background = Image::new(3, 3, vec![0; 9]).unwrap();
        let mask = generate_mask(&foreground, &background, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(mask.foreground_pixel_count(), 1);
        assert!(mask.is_selected(1, 1));
    }

    #[test]
    fn mismatching_dimensions() {
        let foreground = Image::new(2, 1, vec![0, 0]).unwrap();
        let background = Image::new(1, 2, vec![0, 0]).unwrap();
        let result = generate_mask(&foreground, &background, DEFAULT_THRESHOLD);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch((2, 1), (1, 2)))
        ));
    }

    #[test]
    fn empty_images_produce_empty_mask() {
        let empty: Image<u8> = Image::new(0, 0, Vec::new()).unwrap();
        let mask = generate_mask(&empty, &empty, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(mask.dimensions(), (0, 0));
        assert_eq!(mask.coverage(), 0.0);
    }

    #[test]
    fn coverage_of_half_selected_mask() {
        let foreground = Image::new(4, 1, vec![0, 255, 0, 255]).unwrap();
        let background = Image::new(4, 1, vec![0; 4]).unwrap();
        let mask = generate_mask(&foreground, &background, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(mask.foreground_pixel_count(), 2);
        assert_eq!(mask.coverage(), 0.5);
    }

    #[test]
    fn mask_as_rgb_replicates_channel() {
        let mask = Mask::filled(2, 1, true);
        let rgb = mask.to_rgb();
        assert_eq!(rgb.dimensions(), (2, 1));
        assert!(rgb
            .dots()
            .iter()
            .all(|&dot| dot == RGBColorFormat::new(255, 255, 255)));
    }
}
