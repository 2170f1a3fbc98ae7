//! Command-line interface definitions
//!
//! This module organizes CLI arguments by **functional usage** - each group
//! contains the options needed by a specific component.

use crate::command::DEFAULT_PROGRAM;
use crate::launcher::LaunchMode;
use crate::request::{CopyRequest, InterPacketGap, ThreadCount};
use anyhow::Result;
use clap::Parser;
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Build (and optionally run) a robocopy command line
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Source and destination paths
    #[command(flatten)]
    pub paths: PathConfig,

    /// robocopy transfer options
    #[command(flatten)]
    pub transfer: TransferConfig,

    /// Execution configuration
    #[command(flatten)]
    pub launch: LaunchConfig,

    /// Output and logging configuration
    #[command(flatten)]
    pub output: OutputConfig,
}

// ============================================================================
// FUNCTIONAL GROUPS: Organized by what component consumes them
// ============================================================================

/// Paths configuration
///
/// Used by: `validate()`, `RobocopyCommand::from_request()`
#[derive(clap::Args, Debug, Clone)]
pub struct PathConfig {
    /// Source directory or file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Destination directory
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,
}

/// Options translated into robocopy flags
///
/// Used by: `RobocopyCommand::from_request()`
#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Transfer Options")]
#[allow(clippy::struct_excessive_bools)]
pub struct TransferConfig {
    /// Move instead of copy (delete source after copying)
    #[arg(long = "move")]
    pub move_files: bool,

    /// Mirror the source tree (removes extra files at the destination)
    ///
    /// Only valid when the source is a directory.
    #[arg(long)]
    pub mirror: bool,

    /// Do not preserve timestamps
    #[arg(long)]
    pub no_timestamps: bool,

    /// Number of copy threads (0 = single-threaded)
    ///
    /// One of: 0, 2, 4, 8, 16, 32, 64, 128
    #[arg(long, default_value = "0")]
    pub threads: ThreadCount,

    /// Throughput cap in MB/s
    #[arg(long, value_name = "MB")]
    pub max_mbps: Option<NonZeroU32>,

    /// Inter-packet gap in milliseconds (0 = none)
    ///
    /// Presets: 25 (~30 MB/s), 30 (~22 MB/s), 40 (~20 MB/s), 50 (~14.5 MB/s)
    #[arg(long, value_name = "MS", default_value = "0")]
    pub ipg: InterPacketGap,

    /// Restartable mode (resume interrupted copies)
    #[arg(long)]
    pub restartable: bool,

    /// Unbuffered I/O (robocopy /J) for very large files
    ///
    /// This is not a long-path toggle; robocopy handles long paths by default.
    #[arg(long)]
    pub huge_files: bool,
}

/// Execution configuration
///
/// Used by: `main()`, `Session::execute()`
#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Execution Options")]
pub struct LaunchConfig {
    /// Run the generated command and report its exit code
    #[arg(short = 'x', long)]
    pub execute: bool,

    /// Program to invoke
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    pub program: String,

    /// Run through the platform shell instead of spawning directly
    #[arg(long, requires = "execute")]
    pub shell: bool,
}

impl LaunchConfig {
    #[must_use]
    pub const fn mode(&self) -> LaunchMode {
        if self.shell {
            LaunchMode::Shell
        } else {
            LaunchMode::Direct
        }
    }
}

/// Output and logging configuration
///
/// Used by: `main()`, logging initialization, progress display
#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Output Options")]
pub struct OutputConfig {
    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except errors)
    #[arg(short, long)]
    pub quiet: bool,
}

// ============================================================================
// IMPLEMENTATION: Conversion and validation
// ============================================================================

impl Args {
    /// Validate flag combinations
    ///
    /// Path checks are not done here; they belong to request validation.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - Both --quiet and --verbose options are used
    /// - The program name is empty
    pub fn validate(&self) -> Result<()> {
        if self.output.quiet && self.output.verbose > 0 {
            anyhow::bail!("Cannot use both --quiet and --verbose options");
        }

        if self.launch.program.trim().is_empty() {
            anyhow::bail!("Program name must not be empty");
        }

        Ok(())
    }

    /// Snapshot the arguments as a copy request
    #[must_use]
    pub fn to_request(&self) -> CopyRequest {
        CopyRequest {
            source: self.paths.source.clone(),
            destination: self.paths.destination.clone(),
            move_files: self.transfer.move_files,
            mirror: self.transfer.mirror,
            keep_timestamps: !self.transfer.no_timestamps,
            threads: self.transfer.threads,
            throughput_mb: self.transfer.max_mbps,
            inter_packet_gap: self.transfer.ipg,
            restartable: self.transfer.restartable,
            huge_files: self.transfer.huge_files,
        }
    }
}
