//! robowrap command-line entry point
//!
//! Prints the generated robocopy command on stdout. With `--execute` the
//! command runs on a worker thread while a spinner ticks here, and robowrap
//! exits with robocopy's exit code.

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use robowrap::cli::Args;
use robowrap::{logging, Error, ExitReport, Session, SessionError, Status};
use std::process::ExitCode;
use std::time::Duration;

/// Exit code used when the request fails validation
const EXIT_INVALID: u8 = 2;

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    args.validate()?;
    logging::init(&args.output);

    let request = args.to_request();
    let mut session = Session::new(args.launch.program.clone());

    if !args.launch.execute {
        return match session.generate(&request) {
            Ok(command) => {
                println!("{command}");
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{e}");
                Ok(ExitCode::from(EXIT_INVALID))
            }
        };
    }

    let handle = match session.execute(&request, args.launch.mode()) {
        Ok(handle) => handle,
        Err(Error::Session(e @ SessionError::Invalid(_))) => {
            eprintln!("{e}");
            return Ok(ExitCode::from(EXIT_INVALID));
        }
        Err(e) => return Err(e.into()),
    };
    println!("{}", session.command_text());

    let spinner = (!args.output.quiet).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_message(session.status().to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    });

    let outcome = handle.wait_blocking();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let report = outcome.as_ref().ok().copied();
    session.finish(outcome);

    match (session.status(), report) {
        // anyhow prints the reason once on the way out
        (Status::LaunchFailed(reason), _) => anyhow::bail!("{reason}"),
        (status, Some(report)) => {
            if !args.output.quiet {
                eprintln!("{status}");
            }
            Ok(exit_code_for(report))
        }
        (_, None) => Ok(ExitCode::FAILURE),
    }
}

/// robocopy's own exit code, or failure when it died without one
fn exit_code_for(report: ExitReport) -> ExitCode {
    report
        .code()
        .map_or(ExitCode::FAILURE, |code| {
            ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
        })
}
