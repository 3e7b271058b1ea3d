use crate::color::RGBColorFormat;
use crate::error::Error;

pub mod compositor;
pub mod extractor;
pub mod grayscale;
pub mod mask;
pub mod reader;
pub mod resample;

pub type RgbImage = Image<RGBColorFormat<u8>>;
pub type LuminanceImage = Image<u8>;

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<RgbImage>;
}

/// A raster of `width * height` dots stored row by row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image<T> {
    width: u32,
    height: u32,
    dots: Vec<T>,
}

impl<T> Image<T> {
    pub fn new(width: u32, height: u32, dots: Vec<T>) -> crate::Result<Self> {
        let expected_number_of_dots = width as usize * height as usize;
        if dots.len() != expected_number_of_dots {
            return Err(Error::PixelCountDoesNotMatchDimensions(
                expected_number_of_dots,
                dots.len(),
            ));
        }
        Ok(Image {
            width,
            height,
            dots,
        })
    }

    pub(crate) fn from_fn<F>(width: u32, height: u32, mut dot_at: F) -> Self
    where
        F: FnMut(u32, u32) -> T,
    {
        let mut dots = Vec::with_capacity(width as usize * height as usize);
        for row_index in 0..height {
            for column_index in 0..width {
                dots.push(dot_at(column_index, row_index));
            }
        }
        Image {
            width,
            height,
            dots,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn dots(&self) -> &[T] {
        &self.dots
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    pub fn dot(&self, column_index: u32, row_index: u32) -> &T {
        let index = column_index as usize + row_index as usize * self.width as usize;
        &self.dots[index]
    }

    /// Fails unless `other` has exactly the dimensions of `self`.
    pub fn check_same_dimensions<U>(&self, other: &Image<U>) -> crate::Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }
        Ok(())
    }

    pub fn map<U, F>(&self, transform: F) -> Image<U>
    where
        F: FnMut(&T) -> U,
    {
        Image {
            width: self.width,
            height: self.height,
            dots: self.dots.iter().map(transform).collect(),
        }
    }
}
