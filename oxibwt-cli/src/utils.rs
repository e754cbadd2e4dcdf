//! Utility functions for the CLI.

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Map `-v`/`-q` flags to a log level.
pub fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Start the terminal logger. Logs go to stderr; stdout carries data.
pub fn init_logging(level: LevelFilter) {
    // A logger may already be installed when running under a test harness
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// Open the input file, or stdin when no path is given.
pub fn open_input(path: Option<&Path>) -> io::Result<Box<dyn Read>> {
    Ok(match path {
        Some(p) => Box::new(BufReader::new(File::open(p)?)),
        None => Box::new(io::stdin().lock()),
    })
}

/// Create the output file, or use stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Human-readable name for an optional path.
pub fn describe(path: Option<&Path>, fallback: &'static str) -> String {
    path.map_or_else(|| fallback.to_string(), |p| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0, false), LevelFilter::Warn);
        assert_eq!(log_level(1, false), LevelFilter::Info);
        assert_eq!(log_level(2, false), LevelFilter::Debug);
        assert_eq!(log_level(9, false), LevelFilter::Trace);
        assert_eq!(log_level(3, true), LevelFilter::Error);
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(None, "<stdin>"), "<stdin>");
        assert_eq!(describe(Some(Path::new("a.bwt")), "<stdin>"), "a.bwt");
    }
}
