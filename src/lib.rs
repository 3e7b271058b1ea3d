use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
pub use color::RGBColorFormat;
pub use error::Error;
pub use image::{
    compositor::apply_mask,
    extractor::{Extraction, ExtractionOptions, ForegroundExtractor},
    grayscale::to_grayscale,
    mask::{generate_mask, Mask, DEFAULT_THRESHOLD, MASK_MAX, MASK_MIN},
    reader::ppm::PPMImageReader,
    resample::resize,
    Image, ImageReader, LuminanceImage, RgbImage,
};
use threadpool::ThreadPool;

mod cli;
mod color;
mod error;
mod image;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    background_file: PathBuf,
    foreground_file: PathBuf,
    threshold: u8,
    number_of_threads: usize,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn read_ppm_file(file_path: &Path) -> Result<RgbImage> {
    let input_file = open_input_file(file_path)?;
    let mut reader = PPMImageReader::new(BufReader::new(input_file));
    let image = reader.read_image()?;
    log::info!(
        "Loaded {}x{} image from {}",
        image.width(),
        image.height(),
        file_path.display()
    );
    Ok(image)
}

pub fn extract_foreground_from_files(arguments: &Arguments) -> Result<Extraction> {
    let background = read_ppm_file(&arguments.background_file)?;
    let foreground = read_ppm_file(&arguments.foreground_file)?;
    let options = ExtractionOptions::from(arguments);
    let threadpool = ThreadPool::new(arguments.number_of_threads.max(1));
    let extractor = ForegroundExtractor::new(&options, &threadpool);
    let extraction = extractor.extract(Some(foreground), Some(background))?;
    logger::log_extraction_summary(&extraction);
    Ok(extraction)
}
