//! Running the external copy tool
//!
//! Execution happens off the interaction thread: [`spawn_worker`] starts a
//! dedicated thread with its own compio runtime, runs the command to
//! completion and hands the outcome back through a oneshot channel. The
//! caller consumes the result on its own thread, either by awaiting the
//! [`WorkerHandle`] (GUI) or by blocking on it (CLI).
//!
//! # Architecture
//!
//! ```text
//! interaction thread            worker thread
//! ------------------            -------------
//! spawn_worker(cmd) ─────────▶  compio Runtime::block_on(run(cmd))
//!        │                              │
//!        │                      compio::process::Command
//!        │                              │
//! WorkerHandle::wait ◀── oneshot ── LaunchOutcome
//! ```
//!
//! There is no cancellation: once started, the child runs until it exits.

use crate::command::{RobocopyCommand, ShellDialect};
use crate::error::LaunchError;
use compio::process::Command;
use futures::channel::oneshot;
use std::fmt;
use std::io;
use tracing::{debug, info, warn};

/// Result of one execution
pub type LaunchOutcome = Result<ExitReport, LaunchError>;

/// How the command reaches the operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchMode {
    /// Spawn the program with an argument vector
    #[default]
    Direct,
    /// Hand a quoted command string to the platform shell
    Shell,
}

/// Exit status of the external process, reported verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitReport {
    code: Option<i32>,
}

impl ExitReport {
    #[must_use]
    pub const fn from_code(code: Option<i32>) -> Self {
        Self { code }
    }

    /// Exit code, or `None` if the process was terminated by a signal
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        self.code
    }
}

impl fmt::Display for ExitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("terminated without an exit code"),
        }
    }
}

/// Platform shell and the flag that makes it run one command string
#[cfg(windows)]
const SHELL: (&str, &str) = ("cmd", "/C");
#[cfg(not(windows))]
const SHELL: (&str, &str) = ("sh", "-c");

fn build_process(
    command: &RobocopyCommand,
    mode: LaunchMode,
) -> Result<(Command, String), LaunchError> {
    match mode {
        LaunchMode::Direct => {
            let mut cmd = Command::new(command.program());
            cmd.args(command.args());
            Ok((cmd, command.program().to_string()))
        }
        LaunchMode::Shell => {
            let (shell, flag) = SHELL;
            let line = command.shell_line(ShellDialect::NATIVE)?;
            let mut cmd = Command::new(shell);
            cmd.arg(flag).arg(line);
            Ok((cmd, shell.to_string()))
        }
    }
}

fn spawn_error(program: String, source: io::Error) -> LaunchError {
    if source.kind() == io::ErrorKind::NotFound {
        LaunchError::ProgramNotFound(program)
    } else {
        LaunchError::Io { program, source }
    }
}

/// Run the command to completion on the current compio runtime
///
/// Standard streams are inherited so robocopy's own output reaches the
/// terminal.
///
/// # Errors
///
/// Returns `LaunchError::ProgramNotFound` if the program or shell is missing,
/// `LaunchError::UnsafeShellArgument` if shell mode cannot quote a path
/// literally, and `LaunchError::Io` if spawning or waiting fails otherwise.
pub async fn run(command: &RobocopyCommand, mode: LaunchMode) -> LaunchOutcome {
    let (mut process, program) = build_process(command, mode)?;
    info!("Launching ({:?}): {}", mode, command);

    let child = process
        .spawn()
        .map_err(|e| spawn_error(program.clone(), e))?;
    let status = child
        .wait()
        .await
        .map_err(|source| LaunchError::Io {
            program: program.clone(),
            source,
        })?;

    let report = ExitReport::from_code(status.code());
    if report.code().is_none() {
        warn!("{} {}", program, report);
    } else {
        info!("{} finished with {}", program, report);
    }
    Ok(report)
}

/// Pending result of a run on the worker thread
#[derive(Debug)]
pub struct WorkerHandle {
    receiver: oneshot::Receiver<LaunchOutcome>,
}

impl WorkerHandle {
    /// Await the outcome without blocking the calling thread's executor
    pub async fn wait(self) -> LaunchOutcome {
        self.receiver.await.unwrap_or(Err(LaunchError::WorkerLost))
    }

    /// Block the calling thread until the worker reports
    #[must_use]
    pub fn wait_blocking(self) -> LaunchOutcome {
        futures::executor::block_on(self.wait())
    }
}

/// Run the command on a dedicated thread
///
/// # Errors
///
/// Returns `LaunchError::Io` if the worker thread cannot be started.
pub fn spawn_worker(
    command: RobocopyCommand,
    mode: LaunchMode,
) -> Result<WorkerHandle, LaunchError> {
    let (sender, receiver) = oneshot::channel();

    std::thread::Builder::new()
        .name("robocopy-launch".to_string())
        .spawn(move || {
            let outcome = match compio::runtime::Runtime::new() {
                Ok(runtime) => runtime.block_on(run(&command, mode)),
                Err(source) => Err(LaunchError::Io {
                    program: command.program().to_string(),
                    source,
                }),
            };
            if sender.send(outcome).is_err() {
                debug!("Launch result dropped: receiver went away");
            }
        })
        .map_err(|source| LaunchError::Io {
            program: "launch worker".to_string(),
            source,
        })?;

    Ok(WorkerHandle { receiver })
}
