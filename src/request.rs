//! The copy request: a flat, immutable snapshot of user-chosen options
//!
//! A `CopyRequest` is captured from the CLI flags or the GUI widgets at the
//! moment the user asks for a command, handed to the validator, and dropped
//! once the command string exists. It never touches the filesystem.

use crate::error::Error;
use std::fmt;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;

/// One file or directory transfer as chosen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)] // Transfer options are inherently boolean
pub struct CopyRequest {
    /// File or directory to copy
    pub source: PathBuf,
    /// Target directory
    pub destination: PathBuf,
    /// Delete source after copying
    pub move_files: bool,
    /// Make the destination tree match the source tree exactly
    pub mirror: bool,
    /// Preserve file (and directory) timestamps
    pub keep_timestamps: bool,
    /// robocopy multithreading
    pub threads: ThreadCount,
    /// Throughput cap in megabytes per second
    pub throughput_mb: Option<NonZeroU32>,
    /// Delay between packets, in milliseconds
    pub inter_packet_gap: InterPacketGap,
    /// Restartable mode
    pub restartable: bool,
    /// Unbuffered I/O for very large files
    pub huge_files: bool,
}

impl CopyRequest {
    /// Create a plain copy request with default options
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            move_files: false,
            mirror: false,
            keep_timestamps: true,
            threads: ThreadCount::DISABLED,
            throughput_mb: None,
            inter_packet_gap: InterPacketGap::NONE,
            restartable: false,
            huge_files: false,
        }
    }
}

/// Thread count for robocopy's `/MT`, restricted to a fixed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadCount(u8);

impl ThreadCount {
    /// Multithreading off; no `/MT` flag is emitted
    pub const DISABLED: Self = Self(0);

    /// Values offered by the CLI and the GUI combo box
    pub const CHOICES: [u8; 8] = [0, 2, 4, 8, 16, 32, 64, 128];

    /// Build a thread count if `n` is one of the allowed choices
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidOption` for values outside [`Self::CHOICES`].
    pub fn new(n: u8) -> Result<Self, Error> {
        if Self::CHOICES.contains(&n) {
            Ok(Self(n))
        } else {
            Err(Error::InvalidOption(format!(
                "thread count must be one of {:?}, got: {n}",
                Self::CHOICES
            )))
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.0 != 0
    }
}

impl Default for ThreadCount {
    fn default() -> Self {
        Self::DISABLED
    }
}

impl FromStr for ThreadCount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidOption(format!("thread count is not a number: {s}")))?;
        Self::new(n)
    }
}

impl fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// robocopy `/IPG` delay in milliseconds (0 = no gap)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct InterPacketGap(pub u32);

impl InterPacketGap {
    pub const NONE: Self = Self(0);

    /// Preset gaps with the throughput they roughly give on a gigabit link
    #[must_use]
    pub const fn presets() -> [(Self, &'static str); 5] {
        [
            (Self(0), "0 (max MB/s)"),
            (Self(25), "25 (~30 MB/s)"),
            (Self(30), "30 (~22 MB/s)"),
            (Self(40), "40 (~20 MB/s)"),
            (Self(50), "50 (~14.5 MB/s)"),
        ]
    }

    #[must_use]
    pub const fn millis(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.0 != 0
    }
}

impl FromStr for InterPacketGap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| Error::InvalidOption(format!("inter-packet gap is not a number: {s}")))
    }
}

/// Turn the contents of a path text field into a path
///
/// Drops surrounding whitespace, one pair of double quotes, and the braces
/// some drag-and-drop sources wrap around paths containing spaces.
#[must_use]
pub fn path_from_text(text: &str) -> PathBuf {
    let text = text.trim();
    let text = text
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .or_else(|| text.strip_prefix('"').and_then(|t| t.strip_suffix('"')))
        .unwrap_or(text);
    PathBuf::from(text.trim())
}

/// Parse an optional throughput cap; empty or "0" means no cap
///
/// # Errors
///
/// Returns `Error::InvalidOption` if the text is not a non-negative integer.
pub fn parse_throughput(text: &str) -> Result<Option<NonZeroU32>, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<u32>()
        .map(NonZeroU32::new)
        .map_err(|_| Error::InvalidOption(format!("throughput cap is not a number: {text}")))
}
