use std::env::args_os;
use std::process::ExitCode;

use foreground_extractor::{extract_foreground_from_files, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match extract_foreground_from_files(&arguments) {
        Ok(extraction) => {
            println!(
                "Extraction successful: {} of {} pixels belong to the foreground ({:.1}%)",
                extraction.mask.foreground_pixel_count(),
                extraction.original.dots().len(),
                extraction.mask.coverage() * 100.0
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Extraction failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
