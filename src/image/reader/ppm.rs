use std::io::{self, Read};

use super::super::{Image, ImageReader, RgbImage};
use crate::color::{RGBColorFormat, RangeColorFormat};
use crate::Error;

pub struct PPMImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PPMImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for PPMImageReader<T> {
    fn read_image(&mut self) -> crate::Result<RgbImage> {
        let tokenizer = PPMTokenizer::new(&mut self.reader);
        let mut parser = PPMParser::new(tokenizer);
        let result = parser.parse_tokens();
        if let Some(error) = parser.tokenizer.take_error() {
            return Err(Error::FailedToReadInput(error));
        }
        result
    }
}

struct PPMTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
    error: Option<io::Error>,
}

impl<'a, R: Read> PPMTokenizer<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        PPMTokenizer {
            reader,
            buffer: Vec::new(),
            error: None,
        }
    }

    /// Reads up to `length` bytes following the last token, which ends with a
    /// single whitespace byte. The buffer only grows as bytes arrive.
    fn read_raw(&mut self, length: usize) -> crate::Result<Vec<u8>> {
        let mut raw = Vec::new();
        if let Err(error) = self
            .reader
            .by_ref()
            .take(length as u64)
            .read_to_end(&mut raw)
        {
            self.error = Some(error);
            return Err(Error::UnexpectedEndOfRawData);
        }
        if raw.len() != length {
            return Err(Error::UnexpectedEndOfRawData);
        }
        Ok(raw)
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return None,
                Ok(_) => return Some(byte[0]),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => {
                    self.error = Some(error);
                    return None;
                }
            }
        }
    }

    /// The read error that ended tokenizing early, if any.
    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: Read> Iterator for PPMTokenizer<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        let mut in_comment = false;

        while let Some(byte) = self.read_byte() {
            if in_comment {
                if byte == b'\n' {
                    in_comment = false;
                }
                continue;
            }
            if byte == b'#' {
                in_comment = true;
                continue;
            }
            if byte.is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte);
            }
        }

        if self.buffer.is_empty() {
            return None;
        }

        Some(String::from_utf8_lossy(&self.buffer).into_owned())
    }
}

const MAGIC_NUMBER_TOKEN_NAME: &str = "Magic Number Header";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";

const SAMPLES_PER_DOT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Encoding {
    Plain,
    Raw,
}

#[derive(Clone, Copy)]
struct Dot {
    buffer: [u16; SAMPLES_PER_DOT],
    index: usize,
}

impl Dot {
    fn new() -> Self {
        Self {
            buffer: [u16::default(); SAMPLES_PER_DOT],
            index: 0,
        }
    }

    fn red(&self) -> u16 {
        self.buffer[0]
    }

    fn green(&self) -> u16 {
        self.buffer[1]
    }

    fn blue(&self) -> u16 {
        self.buffer[2]
    }

    fn push_color_component(&mut self, component: u16) {
        if self.is_complete() {
            return;
        }
        self.buffer[self.index] = component;
        self.index += 1;
    }

    fn is_complete(&self) -> bool {
        self.index == SAMPLES_PER_DOT
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn is_empty(&self) -> bool {
        self.index == 0
    }
}

struct PPMParser<'a, R: Read> {
    tokenizer: PPMTokenizer<'a, R>,
}

impl<'a, R: Read> PPMParser<'a, R> {
    fn new(tokenizer: PPMTokenizer<'a, R>) -> Self {
        Self { tokenizer }
    }

    fn parse_tokens(&mut self) -> crate::Result<RgbImage> {
        let encoding = self.parse_magic_number()?;
        let width = self.parse_width()?;
        let height = self.parse_height()?;
        let max_value = self.parse_max_value()?;
        log::debug!(
            "Reading {:?} PPM image of {}x{} with max value {}",
            encoding,
            width,
            height,
            max_value
        );
        let dots = match encoding {
            Encoding::Plain => self.parse_all_dots()?,
            Encoding::Raw => self.read_all_raw_dots(width, height, max_value)?,
        };
        Self::check_parsed_dots_length_match_header_information(&dots, width, height)?;
        let dots = dots
            .into_iter()
            .map(|d| RangeColorFormat::new(max_value, d.red(), d.green(), d.blue()))
            .map(|color| color.map(RGBColorFormat::from))
            .collect::<crate::Result<Vec<RGBColorFormat<u8>>>>()?;
        Image::new(width, height, dots)
    }

    fn check_parsed_dots_length_match_header_information(
        dots: &[Dot],
        width: u32,
        height: u32,
    ) -> crate::Result<()> {
        let expected_number_of_dots = width as usize * height as usize;
        if dots.len() != expected_number_of_dots {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(())
    }

    fn parse_magic_number(&mut self) -> crate::Result<Encoding> {
        let magic_number = self.tokenizer.next().ok_or(
            Error::PPMFileDoesNotContainRequiredToken(MAGIC_NUMBER_TOKEN_NAME),
        )?;
        match magic_number.as_str() {
            "P3" => Ok(Encoding::Plain),
            "P6" => Ok(Encoding::Raw),
            _ => Err(Error::PPMFileDoesNotContainRequiredToken(
                MAGIC_NUMBER_TOKEN_NAME,
            )),
        }
    }

    fn parse_width(&mut self) -> crate::Result<u32> {
        self.parse_header_value(WIDTH_HEADER_TOKEN_NAME)
    }

    fn parse_height(&mut self) -> crate::Result<u32> {
        self.parse_header_value(HEIGHT_HEADER_TOKEN_NAME)
    }

    fn parse_max_value(&mut self) -> crate::Result<u16> {
        let max_value = self.parse_header_value(MAX_VALUE_HEADER_TOKEN_NAME)?;
        if max_value == 0 {
            return Err(Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME));
        }
        Ok(max_value)
    }

    fn parse_header_value<V: std::str::FromStr>(
        &mut self,
        token_name: &'static str,
    ) -> crate::Result<V> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(token_name))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(token_name))
    }

    fn parse_all_dots(&mut self) -> crate::Result<Vec<Dot>> {
        let mut current_dot = Dot::new();
        let mut dots = Vec::new();
        for token in self.tokenizer.by_ref() {
            let component = Self::parse_color_value(&token)?;
            current_dot.push_color_component(component);
            if current_dot.is_complete() {
                dots.push(current_dot);
                current_dot.reset();
            }
        }
        Self::check_pixel_was_complete(&current_dot)?;
        Ok(dots)
    }

    fn read_all_raw_dots(
        &mut self,
        width: u32,
        height: u32,
        max_value: u16,
    ) -> crate::Result<Vec<Dot>> {
        let bytes_per_sample = if max_value > u8::MAX as u16 { 2 } else { 1 };
        let raw_length = (width as usize)
            .checked_mul(height as usize)
            .and_then(|number_of_dots| number_of_dots.checked_mul(SAMPLES_PER_DOT))
            .and_then(|number_of_samples| number_of_samples.checked_mul(bytes_per_sample))
            .ok_or(Error::ImageTooLarge(width, height))?;
        let raw = self.tokenizer.read_raw(raw_length)?;

        let dots = raw
            .chunks_exact(SAMPLES_PER_DOT * bytes_per_sample)
            .map(|dot_bytes| {
                let mut dot = Dot::new();
                for sample in dot_bytes.chunks_exact(bytes_per_sample) {
                    let component = if bytes_per_sample == 2 {
                        u16::from_be_bytes([sample[0], sample[1]])
                    } else {
                        sample[0] as u16
                    };
                    dot.push_color_component(component);
                }
                dot
            })
            .collect();
        Ok(dots)
    }

    fn check_pixel_was_complete(dot: &Dot) -> crate::Result<()> {
        if !dot.is_empty() {
            return Err(Error::IncompletePixelParsed(dot.index));
        }
        Ok(())
    }

    fn parse_color_value(token: &str) -> crate::Result<u16> {
        token
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(COLOR_COMPONENT_VALUE_TOKEN_NAME))
    }
}
