//! Error types for request validation and process launching
//!
//! Validation failures are reported inline and withhold execution. Launch
//! failures are reported after the fact. Nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for robowrap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a copy request fails its pre-flight checks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Source does not exist as a file or a directory
    #[error("source {} is neither a file nor a directory", .0.display())]
    SourceNotFound(PathBuf),

    /// Destination's parent directory does not exist
    #[error("destination parent {} is not a directory", .0.display())]
    DestinationParent(PathBuf),

    /// Mirror requested where one side is a single file
    #[error("cannot mirror a single file: {}", .0.display())]
    MirrorSingleFile(PathBuf),
}

/// Failures starting or waiting on the external copy tool
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The program (or the shell wrapping it) could not be found
    #[error("program not found: {0}")]
    ProgramNotFound(String),

    /// Spawning or waiting on the child failed
    #[error("failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A word the shell would expand instead of passing through literally
    #[error("cannot pass {0:?} through the shell safely")]
    UnsafeShellArgument(String),

    /// The worker thread went away without reporting a result
    #[error("launch worker exited without reporting a result")]
    WorkerLost,
}

/// Actions the session refuses in its current state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Request did not pass validation
    #[error("SANITY CHECK FAILED: {0}")]
    Invalid(#[from] ValidationError),

    /// A previous execution has not finished yet
    #[error("a robocopy run is already in flight")]
    RunInFlight,
}

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// Invalid option value (thread count, throughput, ...)
    #[error("invalid option: {0}")]
    InvalidOption(String),
}
