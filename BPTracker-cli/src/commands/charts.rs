use std::io::Write;

use bp_tracker_data::repository::ReadingRepositoryTrait;
use bp_tracker_domain::services::{Clock, ReadingService};

use super::{CliError, Outcome};
use crate::cli::ChartArgs;
use crate::render;

pub fn latest<R, C, W>(service: &ReadingService<R, C>, out: &mut W) -> Result<Outcome, CliError>
where
    R: ReadingRepositoryTrait,
    C: Clock,
    W: Write,
{
    let latest = service.latest()?;
    render::write_latest(out, latest.as_ref())?;
    Ok(Outcome::Success)
}

pub fn trend<R, C, W>(service: &ReadingService<R, C>, out: &mut W) -> Result<Outcome, CliError>
where
    R: ReadingRepositoryTrait,
    C: Clock,
    W: Write,
{
    let trend = service.trend_banner()?;
    render::write_trend(out, trend.as_ref())?;
    Ok(Outcome::Success)
}

pub fn chart<R, C, W>(
    service: &ReadingService<R, C>,
    args: &ChartArgs,
    out: &mut W,
) -> Result<Outcome, CliError>
where
    R: ReadingRepositoryTrait,
    C: Clock,
    W: Write,
{
    let series = service.chart(args.window)?;
    render::write_chart(out, &series, args.window)?;
    Ok(Outcome::Success)
}
