//! Presentation-side state for generate/execute actions
//!
//! A `Session` lives on the interaction thread. Each action takes a fresh
//! [`CopyRequest`] snapshot, so no widget state leaks between actions. The
//! worker's outcome comes back through [`Session::finish`], called on the same
//! thread once the [`WorkerHandle`](crate::launcher::WorkerHandle) resolves.

use crate::command::{RobocopyCommand, DEFAULT_PROGRAM};
use crate::error::{Result, SessionError};
use crate::launcher::{spawn_worker, LaunchMode, LaunchOutcome, WorkerHandle};
use crate::request::CopyRequest;
use crate::validate::validate;
use std::fmt;
use tracing::{info, warn};

/// Colour class of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Waiting (orange)
    Idle,
    /// Passed or running (green)
    Good,
    /// Failed (red)
    Bad,
}

impl Tone {
    /// Prefix shown before the status text
    ///
    /// Native labels carry no colour, so the tone is spelled out.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Idle => "[..]",
            Self::Good => "[ok]",
            Self::Bad => "[!!]",
        }
    }
}

/// What the status line shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Waiting,
    SanityFailed(String),
    Generated,
    Launched,
    Finished(Option<i32>),
    LaunchFailed(String),
}

impl Status {
    #[must_use]
    pub const fn tone(&self) -> Tone {
        match self {
            Self::Waiting | Self::Generated | Self::Finished(Some(_)) => Tone::Idle,
            Self::Launched => Tone::Good,
            Self::SanityFailed(_) | Self::LaunchFailed(_) | Self::Finished(None) => Tone::Bad,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => f.write_str("Waiting for work"),
            Self::SanityFailed(reason) => write!(f, "SANITY CHECK FAILED: {reason}"),
            Self::Generated => f.write_str("CLI code created, waiting for work ..."),
            Self::Launched => f.write_str("robocopy launched"),
            Self::Finished(Some(code)) => {
                write!(f, "robocopy finished, exit code {code}, waiting for work ...")
            }
            Self::Finished(None) => {
                f.write_str("robocopy terminated without an exit code, waiting for work ...")
            }
            Self::LaunchFailed(reason) => write!(f, "LAUNCH FAILED: {reason}"),
        }
    }
}

/// Generate/execute state machine
#[derive(Debug)]
pub struct Session {
    program: String,
    status: Status,
    command_text: String,
    in_flight: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Session {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            status: Status::Waiting,
            command_text: String::new(),
            in_flight: false,
        }
    }

    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Last generated command string (empty until one was generated)
    #[must_use]
    pub fn command_text(&self) -> &str {
        &self.command_text
    }

    /// False while a run is in flight
    #[must_use]
    pub const fn can_execute(&self) -> bool {
        !self.in_flight
    }

    /// Status line with its tone marker, as the GUI shows it
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status.tone().marker(), self.status)
    }

    /// Validate and format without running anything
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RunInFlight` while a run is active, leaving the
    /// `Launched` status in place, or `SessionError::Invalid` if the request
    /// fails validation; the status line then carries the reason.
    pub fn generate(
        &mut self,
        request: &CopyRequest,
    ) -> std::result::Result<RobocopyCommand, SessionError> {
        if self.in_flight {
            warn!("Generate requested while a run is in flight");
            return Err(SessionError::RunInFlight);
        }
        let command = self.prepare(request)?;
        self.status = Status::Generated;
        Ok(command)
    }

    /// Validate and format, then mark a run as in flight
    ///
    /// The caller is expected to hand the returned command to
    /// [`spawn_worker`](crate::launcher::spawn_worker) and later report back
    /// through [`finish`](Self::finish).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RunInFlight` if a previous run has not
    /// finished, or `SessionError::Invalid` if validation fails.
    pub fn begin_execute(
        &mut self,
        request: &CopyRequest,
    ) -> std::result::Result<RobocopyCommand, SessionError> {
        if self.in_flight {
            warn!("Execute requested while a run is in flight");
            return Err(SessionError::RunInFlight);
        }
        let command = self.prepare(request)?;
        self.in_flight = true;
        self.status = Status::Launched;
        Ok(command)
    }

    /// Validate, format and start the command on a worker thread
    ///
    /// If the worker cannot be started the run is recorded as failed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Session` when [`begin_execute`](Self::begin_execute)
    /// refuses, and `Error::Launch` when the worker thread fails to start.
    pub fn execute(&mut self, request: &CopyRequest, mode: LaunchMode) -> Result<WorkerHandle> {
        let command = self.begin_execute(request)?;
        spawn_worker(command, mode).map_err(|e| {
            self.in_flight = false;
            self.status = Status::LaunchFailed(e.to_string());
            e.into()
        })
    }

    /// Record the worker's outcome
    pub fn finish(&mut self, outcome: LaunchOutcome) {
        self.in_flight = false;
        self.status = match outcome {
            Ok(report) => Status::Finished(report.code()),
            Err(e) => Status::LaunchFailed(e.to_string()),
        };
        info!("{}", self.status);
    }

    fn prepare(
        &mut self,
        request: &CopyRequest,
    ) -> std::result::Result<RobocopyCommand, SessionError> {
        match validate(request) {
            Ok(validated) => {
                let command = RobocopyCommand::from_request(&validated, &self.program);
                self.command_text = command.to_string();
                Ok(command)
            }
            Err(e) => {
                warn!("Sanity check failed: {}", e);
                self.status = Status::SanityFailed(e.to_string());
                Err(SessionError::Invalid(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::error::{Error, LaunchError};
    use crate::launcher::ExitReport;
    use tempfile::TempDir;

    fn valid_request(temp_dir: &TempDir) -> CopyRequest {
        CopyRequest::new(temp_dir.path(), temp_dir.path().join("backup"))
    }

    #[test]
    fn test_initial_state() {
        let session = Session::default();
        assert_eq!(session.status(), &Status::Waiting);
        assert_eq!(session.status().to_string(), "Waiting for work");
        assert_eq!(session.status().tone(), Tone::Idle);
        assert!(session.command_text().is_empty());
        assert!(session.can_execute());
    }

    #[test]
    fn test_generate_sets_command_text() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::default();
        let command = session.generate(&valid_request(&temp_dir)).unwrap();
        assert_eq!(session.command_text(), command.to_string());
        assert_eq!(session.status(), &Status::Generated);
        assert!(session.can_execute());
    }

    #[test]
    fn test_failed_validation_keeps_previous_command() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::default();
        session.generate(&valid_request(&temp_dir)).unwrap();
        let previous = session.command_text().to_string();

        let bad = CopyRequest::new(temp_dir.path().join("nope"), temp_dir.path());
        assert!(matches!(
            session.generate(&bad),
            Err(SessionError::Invalid(_))
        ));
        assert_eq!(session.status().tone(), Tone::Bad);
        assert!(session
            .status()
            .to_string()
            .starts_with("SANITY CHECK FAILED: "));
        assert_eq!(session.command_text(), previous);
    }

    #[test]
    fn test_execute_is_exclusive_until_finished() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::default();
        let request = valid_request(&temp_dir);

        session.begin_execute(&request).unwrap();
        assert_eq!(session.status(), &Status::Launched);
        assert_eq!(session.status().tone(), Tone::Good);
        assert!(!session.can_execute());
        assert_eq!(
            session.begin_execute(&request).unwrap_err(),
            SessionError::RunInFlight
        );

        session.finish(Ok(ExitReport::from_code(Some(1))));
        assert!(session.can_execute());
        assert_eq!(session.status(), &Status::Finished(Some(1)));
        assert_eq!(
            session.status().to_string(),
            "robocopy finished, exit code 1, waiting for work ..."
        );
    }

    #[test]
    fn test_generate_during_run_keeps_launched_status() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::default();
        let request = valid_request(&temp_dir);
        session.begin_execute(&request).unwrap();
        let running_command = session.command_text().to_string();

        assert_eq!(
            session.generate(&request).unwrap_err(),
            SessionError::RunInFlight
        );
        let bad = CopyRequest::new(temp_dir.path().join("nope"), temp_dir.path());
        assert_eq!(
            session.generate(&bad).unwrap_err(),
            SessionError::RunInFlight
        );

        assert_eq!(session.status(), &Status::Launched);
        assert_eq!(session.command_text(), running_command);
        assert!(!session.can_execute());
    }

    #[test]
    fn test_status_line_carries_tone_marker() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::default();
        assert_eq!(session.status_line(), "[..] Waiting for work");

        session.begin_execute(&valid_request(&temp_dir)).unwrap();
        assert_eq!(session.status_line(), "[ok] robocopy launched");

        session.finish(Ok(ExitReport::from_code(None)));
        assert!(session.status_line().starts_with("[!!] "));
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_hands_off_to_worker() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::new("true");
        let handle = session
            .execute(&valid_request(&temp_dir), LaunchMode::Direct)
            .unwrap();
        assert!(!session.can_execute());
        assert!(matches!(
            session.execute(&valid_request(&temp_dir), LaunchMode::Direct),
            Err(Error::Session(SessionError::RunInFlight))
        ));

        session.finish(handle.wait_blocking());
        assert_eq!(session.status(), &Status::Finished(Some(0)));
    }

    #[test]
    fn test_execute_reports_invalid_request() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::default();
        let bad = CopyRequest::new(temp_dir.path().join("nope"), temp_dir.path());
        assert!(matches!(
            session.execute(&bad, LaunchMode::Direct),
            Err(Error::Session(SessionError::Invalid(_)))
        ));
        assert!(session.can_execute());
    }

    #[test]
    fn test_invalid_execute_does_not_mark_in_flight() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::default();
        let bad = CopyRequest::new(temp_dir.path().join("nope"), temp_dir.path());
        assert!(session.begin_execute(&bad).is_err());
        assert!(session.can_execute());
    }

    #[test]
    fn test_launch_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::new("robocopy.exe");
        let command = session.begin_execute(&valid_request(&temp_dir)).unwrap();
        assert_eq!(command.program(), "robocopy.exe");

        session.finish(Err(LaunchError::ProgramNotFound("robocopy.exe".into())));
        assert_eq!(session.status().tone(), Tone::Bad);
        assert!(session.status().to_string().contains("robocopy.exe"));
        assert!(session.can_execute());
    }
}
