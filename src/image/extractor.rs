use std::sync::mpsc;

use threadpool::ThreadPool;

use super::{
    compositor::apply_mask,
    grayscale::to_grayscale,
    mask::{generate_mask, Mask, DEFAULT_THRESHOLD},
    resample::resize,
    LuminanceImage, RgbImage,
};
use crate::{error::Error, Arguments, Result};

pub struct ExtractionOptions {
    pub threshold: u8,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl From<&Arguments> for ExtractionOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            threshold: value.threshold,
        }
    }
}

/// The three images handed back to the caller for display.
#[derive(Debug)]
pub struct Extraction {
    pub original: RgbImage,
    pub mask: Mask,
    pub composite: RgbImage,
}

pub struct ForegroundExtractor<'a> {
    options: &'a ExtractionOptions,
    threadpool: &'a ThreadPool,
}

impl<'a> ForegroundExtractor<'a> {
    pub fn new(options: &'a ExtractionOptions, threadpool: &'a ThreadPool) -> Self {
        ForegroundExtractor {
            options,
            threadpool,
        }
    }

    /// Runs the whole extraction on the given shots.
    ///
    /// Fails with [`Error::MissingInput`] if a shot is absent and with
    /// [`Error::CannotResampleEmptyImage`] if the background has no pixels but
    /// the foreground does.
    pub fn extract(
        &self,
        foreground: Option<RgbImage>,
        background: Option<RgbImage>,
    ) -> Result<Extraction> {
        let foreground = foreground.ok_or(Error::MissingInput("foreground"))?;
        let background = background.ok_or(Error::MissingInput("background"))?;

        let resized_background = resize(&background, foreground.width(), foreground.height())?;
        drop(background);

        let (gray_foreground, gray_background) =
            self.convert_both_to_grayscale(&foreground, resized_background)?;
        let mask = generate_mask(&gray_foreground, &gray_background, self.options.threshold)?;
        let composite = apply_mask(&foreground, &mask)?;

        log::info!(
            "Extracted {} foreground pixels out of {}x{}",
            mask.foreground_pixel_count(),
            foreground.width(),
            foreground.height()
        );

        Ok(Extraction {
            original: foreground,
            mask,
            composite,
        })
    }

    /// Converts the background on the pool while the foreground is converted
    /// on the calling thread.
    fn convert_both_to_grayscale(
        &self,
        foreground: &RgbImage,
        background: RgbImage,
    ) -> Result<(LuminanceImage, LuminanceImage)> {
        let (sender, receiver) = mpsc::channel();
        self.threadpool.execute(move || {
            let gray_background = to_grayscale(&background);
            if sender.send(gray_background).is_err() {
                log::warn!("Grayscale background was discarded by the receiver");
            }
        });
        let gray_foreground = to_grayscale(foreground);
        let gray_background = receiver
            .recv()
            .map_err(|_| Error::GrayscaleWorkerFailed)?;
        Ok((gray_foreground, gray_background))
    }
}

#[cfg(test)]
mod test {
    use threadpool::ThreadPool;

    use super::{ExtractionOptions, ForegroundExtractor};
    use crate::color::RGBColorFormat;
    use crate::error::Error;
    use crate::image::{mask::MASK_MAX, mask::MASK_MIN, Image, RgbImage};

    fn image(width: u32, height: u32, dots: &[(u8, u8, u8)]) -> RgbImage {
        let dots = dots
            .iter()
            .map(|&(red, green, blue)| RGBColorFormat::new(red, green, blue))
            .collect();
        Image::new(width, height, dots).unwrap()
    }

    fn background() -> RgbImage {
        image(2, 1, &[(195, 195, 195), (10, 10, 10)])
    }

    #[test]
    fn similar_images_produce_empty_mask() {
        let threadpool = ThreadPool::new(2);
        let options = ExtractionOptions::default();
        let extractor = ForegroundExtractor::new(&options, &threadpool);
        let foreground = image(2, 1, &[(200, 200, 200), (10, 10, 10)]);

        let extraction = extractor
            .extract(Some(foreground.clone()), Some(background()))
            .unwrap();

        assert_eq!(extraction.original, foreground);
        assert_eq!(extraction.mask.image().dots(), &[MASK_MIN, MASK_MIN]);
        assert_eq!(
            extraction.composite.dots(),
            &[RGBColorFormat::BLACK, RGBColorFormat::BLACK]
        );
    }

    #[test]
    fn changed_pixel_is_extracted() {
        let threadpool = ThreadPool::new(2);
        let options = ExtractionOptions::default();
        let extractor = ForegroundExtractor::new(&options, &threadpool);
        let foreground = image(2, 1, &[(255, 0, 0), (10, 10, 10)]);

        let extraction = extractor
            .extract(Some(foreground), Some(background()))
            .unwrap();

        assert_eq!(extraction.mask.image().dots(), &[MASK_MAX, MASK_MIN]);
        assert_eq!(
            extraction.composite.dots(),
            &[RGBColorFormat::new(255, 0, 0), RGBColorFormat::BLACK]
        );
    }

    #[test]
    fn background_is_resized_to_foreground() {
        let threadpool = ThreadPool::new(1);
        let options = ExtractionOptions { threshold: 30 };
        let extractor = ForegroundExtractor::new(&options, &threadpool);
        let foreground = image(3, 2, &[(0, 0, 0); 6]);
        let background = image(1, 1, &[(0, 0, 0)]);

        let extraction = extractor
            .extract(Some(foreground), Some(background))
            .unwrap();

        assert_eq!(extraction.mask.dimensions(), (3, 2));
        assert_eq!(extraction.composite.dimensions(), (3, 2));
        assert_eq!(extraction.mask.foreground_pixel_count(), 0);
    }

    #[test]
    fn threshold_option_is_used() {
        let threadpool = ThreadPool::new(1);
        let options = ExtractionOptions { threshold: 4 };
        let extractor = ForegroundExtractor::new(&options, &threadpool);
        let foreground = image(2, 1, &[(200, 200, 200), (10, 10, 10)]);

        let extraction = extractor
            .extract(Some(foreground), Some(background()))
            .unwrap();

        // luminance 200 against 194
        assert_eq!(extraction.mask.image().dots(), &[MASK_MAX, MASK_MIN]);
    }

    #[test]
    fn missing_background() {
        let threadpool = ThreadPool::new(1);
        let options = ExtractionOptions::default();
        let extractor = ForegroundExtractor::new(&options, &threadpool);

        let result = extractor.extract(Some(background()), None);

        assert!(matches!(result, Err(Error::MissingInput("background"))));
    }

    #[test]
    fn missing_foreground() {
        let threadpool = ThreadPool::new(1);
        let options = ExtractionOptions::default();
        let extractor = ForegroundExtractor::new(&options, &threadpool);

        let result = extractor.extract(None, None);

        assert!(matches!(result, Err(Error::MissingInput("foreground"))));
    }

    #[test]
    fn empty_background_cannot_be_resized() {
        let threadpool = ThreadPool::new(1);
        let options = ExtractionOptions::default();
        let extractor = ForegroundExtractor::new(&options, &threadpool);

        let result = extractor.extract(Some(background()), Some(image(0, 0, &[])));

        assert!(matches!(result, Err(Error::CannotResampleEmptyImage)));
    }

    #[test]
    fn empty_foreground_yields_empty_result() {
        let threadpool = ThreadPool::new(1);
        let options = ExtractionOptions::default();
        let extractor = ForegroundExtractor::new(&options, &threadpool);

        let extraction = extractor
            .extract(Some(image(0, 0, &[])), Some(background()))
            .unwrap();

        assert!(extraction.composite.is_empty());
        assert_eq!(extraction.mask.dimensions(), (0, 0));
    }
}
