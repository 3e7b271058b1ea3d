use crate::image::extractor::Extraction;

const LOG_CONFIGURATION_FILE: &str = "log4rs.yaml";

#[ctor::ctor]
fn init() {
    if let Err(e) = log4rs::init_file(LOG_CONFIGURATION_FILE, Default::default()) {
        eprintln!(
            "Logging disabled, unable to load '{}': {}",
            LOG_CONFIGURATION_FILE, e
        );
    }
}

pub fn log_extraction_summary(extraction: &Extraction) {
    let (width, height) = extraction.original.dimensions();
    log::info!(
        "{}x{} foreground: {} pixels selected, coverage {:.2}%",
        width,
        height,
        extraction.mask.foreground_pixel_count(),
        extraction.mask.coverage() * 100.0
    );
}
