// Command handlers
// Each handler drives the reading service and writes its output to `out`.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use thiserror::Error;

use bp_tracker_data::repository::ReadingRepositoryTrait;
use bp_tracker_domain::services::{Clock, ReadingService, ReadingServiceError};

use crate::cli::Command;

mod charts;
mod readings;

/// Exit code used when submitted fields fail validation
pub const VALIDATION_FAILURE_CODE: u8 = 2;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The submitted reading was rejected; field errors were printed
    Invalid,
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Invalid => ExitCode::from(VALIDATION_FAILURE_CODE),
        }
    }
}

/// Command failures other than validation
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Service(#[from] ReadingServiceError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run one command against `service`
///
/// `input` is only read by the delete confirmation prompt.
pub fn run<R, C, I, W>(
    command: &Command,
    service: &mut ReadingService<R, C>,
    input: &mut I,
    out: &mut W,
) -> Result<Outcome, CliError>
where
    R: ReadingRepositoryTrait,
    C: Clock,
    I: BufRead,
    W: Write,
{
    let outcome = match command {
        Command::Add(args) => readings::add(service, args, out)?,
        Command::Edit(args) => readings::edit(service, args, out)?,
        Command::Delete(args) => readings::delete(service, args, input, out)?,
        Command::List(args) => readings::list(service, args, out)?,
        Command::Latest => charts::latest(service, out)?,
        Command::Trend => charts::trend(service, out)?,
        Command::Chart(args) => charts::chart(service, args, out)?,
    };

    out.flush()?;
    Ok(outcome)
}
