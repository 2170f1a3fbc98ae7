//! Rendering a validated request as a robocopy command line
//!
//! Formatting is pure: the same [`ValidatedRequest`] always yields a
//! byte-identical command. Paths are wrapped in double quotes when rendered
//! for display and passed through untouched as argv. Text handed to a shell
//! goes through [`RobocopyCommand::shell_line`] instead, which quotes every
//! word for the receiving shell.

use crate::error::LaunchError;
use crate::request::CopyRequest;
use crate::validate::{SourceKind, ValidatedRequest};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the external copy tool
pub const DEFAULT_PROGRAM: &str = "robocopy";

/// Quoting rules of the shell that receives a command string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellDialect {
    /// `sh -c`: words single-quoted, `'` written as `'\''`
    Posix,
    /// `cmd /C`: words double-quoted; `%` and `"` cannot be made literal
    Cmd,
}

impl ShellDialect {
    /// Dialect of the shell used on this platform
    #[cfg(windows)]
    pub const NATIVE: Self = Self::Cmd;
    #[cfg(not(windows))]
    pub const NATIVE: Self = Self::Posix;

    fn quote(self, word: &str) -> Result<String, LaunchError> {
        match self {
            Self::Posix => Ok(format!("'{}'", word.replace('\'', r"'\''"))),
            Self::Cmd => {
                if word.contains(['%', '"']) {
                    return Err(LaunchError::UnsafeShellArgument(word.to_string()));
                }
                Ok(format!("\"{word}\""))
            }
        }
    }
}

/// One argument of the command line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Arg {
    /// Rendered inside double quotes
    Path(PathBuf),
    /// Rendered bare
    Flag(String),
}

impl Arg {
    fn as_os_str(&self) -> &OsStr {
        match self {
            Self::Path(p) => p.as_os_str(),
            Self::Flag(f) => OsStr::new(f),
        }
    }
}

/// A complete robocopy invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobocopyCommand {
    program: String,
    args: Vec<Arg>,
}

impl RobocopyCommand {
    /// Build the command for a validated request
    #[must_use]
    pub fn from_request(validated: &ValidatedRequest, program: &str) -> Self {
        let req = validated.request();
        let kind = validated.source_kind();
        let mut args = Vec::new();

        match kind {
            SourceKind::Directory => {
                args.push(Arg::Path(req.source.clone()));
                args.push(Arg::Path(req.destination.clone()));
            }
            SourceKind::File => {
                let (dir, name) = split_file_source(&req.source);
                args.push(Arg::Path(dir));
                args.push(Arg::Path(req.destination.clone()));
                args.push(Arg::Path(name));
            }
        }

        args.extend(flags(req, kind).into_iter().map(Arg::Flag));

        let command = Self {
            program: program.to_string(),
            args,
        };
        debug!("Formatted command: {command}");
        command
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments as passed to the process, without shell quoting
    pub fn args(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(Arg::as_os_str)
    }

    /// Command string for a shell, with every word quoted literally
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::UnsafeShellArgument` for a word that is not
    /// valid UTF-8 or that the dialect cannot quote literally.
    pub fn shell_line(&self, dialect: ShellDialect) -> Result<String, LaunchError> {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(dialect.quote(&self.program)?);
        for arg in self.args() {
            let word = arg.to_str().ok_or_else(|| {
                LaunchError::UnsafeShellArgument(arg.to_string_lossy().into_owned())
            })?;
            words.push(dialect.quote(word)?);
        }
        Ok(words.join(" "))
    }

    /// Check whether a bare flag is present
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args
            .iter()
            .any(|a| matches!(a, Arg::Flag(f) if f == flag))
    }
}

impl fmt::Display for RobocopyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            match arg {
                Arg::Path(p) => write!(f, " \"{}\"", p.display())?,
                Arg::Flag(flag) => write!(f, " {flag}")?,
            }
        }
        Ok(())
    }
}

/// robocopy copies single files as `<dir> <dest> <name>`
fn split_file_source(source: &Path) -> (PathBuf, PathBuf) {
    let dir = match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = source
        .file_name()
        .map_or_else(|| source.to_path_buf(), PathBuf::from);
    (dir, name)
}

fn flags(req: &CopyRequest, kind: SourceKind) -> Vec<String> {
    let is_dir = kind == SourceKind::Directory;
    let mut flags = Vec::new();

    if is_dir {
        flags.push("/E".to_string());
    }

    if req.move_files {
        flags.push(if is_dir { "/MOVE" } else { "/MOV" }.to_string());
    }

    if req.mirror {
        flags.push("/MIR".to_string());
    }

    let copy = if req.keep_timestamps { "DAT" } else { "DA" };
    flags.push(format!("/COPY:{copy}"));
    if is_dir {
        flags.push(format!("/DCOPY:{copy}"));
    }

    if req.threads.is_enabled() {
        flags.push(format!("/MT:{}", req.threads));
    }

    if let Some(mb) = req.throughput_mb {
        flags.push(format!("/IoRate:{mb}M"));
    }

    if req.inter_packet_gap.is_enabled() {
        flags.push(format!("/IPG:{}", req.inter_packet_gap.millis()));
    }

    if req.restartable {
        flags.push("/Z".to_string());
    }

    if req.huge_files {
        flags.push("/J".to_string());
    }

    flags
}
