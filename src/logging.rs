//! Tracing subscriber setup

use crate::cli::OutputConfig;
use tracing::Level;

/// Map `-q` / `-v` counts onto a maximum log level
#[must_use]
pub const fn level_for(output: &OutputConfig) -> Level {
    if output.quiet {
        return Level::ERROR;
    }
    match output.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global fmt subscriber, writing to stderr
///
/// stdout is reserved for the generated command line.
pub fn init(output: &OutputConfig) {
    tracing_subscriber::fmt()
        .with_max_level(level_for(output))
        .with_writer(std::io::stderr)
        .init();
}
