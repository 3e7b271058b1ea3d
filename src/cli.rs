use crate::image::mask::DEFAULT_THRESHOLD;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_background_file_argument(command);
        let command = Self::register_foreground_file_argument(command);
        let command = Self::register_threshold_argument(command);
        Self::register_threads_argument(command)
    }

    fn register_background_file_argument(command: Command) -> Command {
        command.arg(Self::create_background_file_argument())
    }

    fn register_foreground_file_argument(command: Command) -> Command {
        command.arg(Self::create_foreground_file_argument())
    }

    fn register_threshold_argument(command: Command) -> Command {
        command.arg(Self::create_threshold_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_background_file_argument() -> Arg {
        Arg::new("background_file")
            .help("Path to PPM image of the empty scene")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_foreground_file_argument() -> Arg {
        Arg::new("foreground_file")
            .help("Path to PPM image of the scene with the subject")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_threshold_argument() -> Arg {
        arg!(-t --threshold <THRESHOLD> "Luminance difference a pixel must exceed to count as foreground")
            .default_value(DEFAULT_THRESHOLD.to_string())
            .value_parser(value_parser!(u8))
    }

    fn create_threads_argument() -> Arg {
        arg!(-j --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            background_file: Self::extract_background_file_argument(matches),
            foreground_file: Self::extract_foreground_file_argument(matches),
            threshold: Self::extract_threshold_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
        }
    }

    fn extract_background_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("background_file")
            .expect("Required argument background_file not provided")
            .clone()
    }

    fn extract_foreground_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("foreground_file")
            .expect("Required argument foreground_file not provided")
            .clone()
    }

    fn extract_threshold_argument(matches: &ArgMatches) -> u8 {
        matches
            .get_one::<u8>("threshold")
            .expect("Threshold must be provided, but was unset.")
            .to_owned()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
