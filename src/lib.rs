//! robowrap: build, validate and launch robocopy command lines
//!
//! The library is the whole core: a [`CopyRequest`] snapshot is checked by
//! [`validate`], rendered by [`RobocopyCommand`] and optionally executed on a
//! worker thread by [`launcher::spawn_worker`]. [`Session`] ties these
//! together for the interaction surfaces (CLI binary and the optional GUI).

pub mod cli;
pub mod command;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod request;
pub mod session;
pub mod validate;

#[cfg(feature = "gui")]
pub mod gui;

pub use command::RobocopyCommand;
pub use error::{Error, LaunchError, Result, SessionError, ValidationError};
pub use launcher::{ExitReport, LaunchMode, LaunchOutcome, WorkerHandle};
pub use request::{CopyRequest, InterPacketGap, ThreadCount};
pub use session::{Session, Status, Tone};
pub use validate::{validate, SourceKind, ValidatedRequest};
