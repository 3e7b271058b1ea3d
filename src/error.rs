use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    MissingInput(&'static str),
    DimensionMismatch((u32, u32), (u32, u32)),
    PixelCountDoesNotMatchDimensions(usize, usize),
    CannotResampleEmptyImage,
    GrayscaleWorkerFailed,
    PPMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    IncompletePixelParsed(usize),
    MismatchOfSizeBetweenHeaderAndValues,
    ColorValueExceedsMaxValue(u16, u16),
    UnexpectedEndOfRawData,
    ImageTooLarge(u32, u32),
    FailedToReadInput(std::io::Error),
    UnableToOpenInputFileForReading(String, std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInput(image_name) => {
                write!(
                    f,
                    "No {} image supplied. Please load both background and foreground images.",
                    image_name
                )
            }
            Self::DimensionMismatch((expected_width, expected_height), (width, height)) => {
                write!(
                    f,
                    "Image dimensions do not match. Expected {}x{}, but got {}x{}.",
                    expected_width, expected_height, width, height
                )
            }
            Self::PixelCountDoesNotMatchDimensions(expected, actual) => {
                write!(
                    f,
                    "Image dimensions require {} pixels, but {} were provided",
                    expected, actual
                )
            }
            Self::CannotResampleEmptyImage => {
                write!(f, "Unable to resample an empty image to a non-empty size")
            }
            Self::GrayscaleWorkerFailed => {
                write!(f, "Grayscale conversion worker terminated without a result")
            }
            Self::PPMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PPM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::IncompletePixelParsed(number_of_tokens_parsed) => {
                write!(
                    f,
                    "Incomplete pixel parsed. Expected 3 components, but got {}.",
                    number_of_tokens_parsed
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of pixels does not match the size provided in header"
                )
            }
            Self::ColorValueExceedsMaxValue(value, max) => {
                write!(
                    f,
                    "Color value {} must not be greater than max value of {}",
                    value, max
                )
            }
            Self::UnexpectedEndOfRawData => {
                write!(f, "PPM file ended before all raw pixel data was read")
            }
            Self::ImageTooLarge(width, height) => {
                write!(f, "Image of {}x{} pixels is too large to be read", width, height)
            }
            Self::FailedToReadInput(error) => {
                write!(f, "Failed to read input: {}", error)
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
        }
    }
}

impl std::error::Error for Error {}
