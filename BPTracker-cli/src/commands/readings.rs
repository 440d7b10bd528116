use std::io::{BufRead, Write};

use tracing::debug;

use bp_tracker_data::repository::ReadingRepositoryTrait;
use bp_tracker_domain::entities::ReadingForm;
use bp_tracker_domain::services::{Clock, ReadingService, ReadingServiceError, Submission};

use super::{CliError, Outcome};
use crate::cli::{DeleteArgs, EditArgs, ListArgs, ReadingArgs};
use crate::render::{self, ReadingView, NO_READINGS_YET};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this reading?";

pub fn add<R, C, W>(
    service: &mut ReadingService<R, C>,
    args: &ReadingArgs,
    out: &mut W,
) -> Result<Outcome, CliError>
where
    R: ReadingRepositoryTrait,
    C: Clock,
    W: Write,
{
    let form = args.apply_to(ReadingForm::blank(service.clock().today()));
    submit(service, &form, None, out)
}

/// Fields not given on the command line keep their stored values
pub fn edit<R, C, W>(
    service: &mut ReadingService<R, C>,
    args: &EditArgs,
    out: &mut W,
) -> Result<Outcome, CliError>
where
    R: ReadingRepositoryTrait,
    C: Clock,
    W: Write,
{
    let base = match service.find(&args.id)? {
        Some(existing) => ReadingForm::from(&existing),
        None => {
            debug!("No reading with id {}, editing a blank form", args.id);
            ReadingForm::blank(service.clock().today())
        }
    };

    let form = args.fields.apply_to(base);
    submit(service, &form, Some(&args.id), out)
}

fn submit<R, C, W>(
    service: &mut ReadingService<R, C>,
    form: &ReadingForm,
    editing_id: Option<&str>,
    out: &mut W,
) -> Result<Outcome, CliError>
where
    R: ReadingRepositoryTrait,
    C: Clock,
    W: Write,
{
    match service.submit_form(form, editing_id) {
        Ok(Submission::Created(reading)) => {
            write!(out, "Saved reading: ")?;
            render::write_reading(out, &reading, service.get_severity(&reading))?;
            Ok(Outcome::Success)
        }
        Ok(Submission::Updated(_)) => {
            writeln!(out, "Reading updated.")?;
            Ok(Outcome::Success)
        }
        Err(ReadingServiceError::Validation(errors)) => {
            render::write_field_errors(out, &errors)?;
            Ok(Outcome::Invalid)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn delete<R, C, I, W>(
    service: &mut ReadingService<R, C>,
    args: &DeleteArgs,
    input: &mut I,
    out: &mut W,
) -> Result<Outcome, CliError>
where
    R: ReadingRepositoryTrait,
    C: Clock,
    I: BufRead,
    W: Write,
{
    if !args.yes && !confirm(input, out)? {
        writeln!(out, "Delete cancelled.")?;
        return Ok(Outcome::Success);
    }

    service.delete(&args.id)?;
    writeln!(out, "Reading deleted.")?;
    Ok(Outcome::Success)
}

fn confirm<I: BufRead, W: Write>(input: &mut I, out: &mut W) -> Result<bool, CliError> {
    write!(out, "{} [y/N] ", DELETE_PROMPT)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn list<R, C, W>(
    service: &ReadingService<R, C>,
    args: &ListArgs,
    out: &mut W,
) -> Result<Outcome, CliError>
where
    R: ReadingRepositoryTrait,
    C: Clock,
    W: Write,
{
    let readings = service.readings()?;

    if args.json {
        let views: Vec<ReadingView<'_>> = readings
            .iter()
            .map(|reading| ReadingView::new(reading, service.get_severity(reading)))
            .collect();
        serde_json::to_writer_pretty(&mut *out, &views)?;
        writeln!(out)?;
        return Ok(Outcome::Success);
    }

    if readings.is_empty() {
        writeln!(out, "{}", NO_READINGS_YET)?;
    }
    for reading in &readings {
        render::write_reading(out, reading, service.get_severity(reading))?;
    }
    Ok(Outcome::Success)
}
