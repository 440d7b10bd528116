// Output formatting for the command line.
// Everything writes to a caller-supplied writer so commands can be tested.

use std::io::{self, Write};

use serde::Serialize;

use bp_tracker_domain::entities::{
    BloodPressureCategory, DailySeries, FieldErrors, Reading, TrendWindow, WeeklyTrend,
};
use bp_tracker_domain::services::LatestReading;

pub const NO_READINGS_YET: &str = "No readings yet";
pub const NO_DATA_AVAILABLE: &str = "No data available.";

/// A reading with its category, as printed by `list --json`
#[derive(Debug, Serialize)]
pub struct ReadingView<'a> {
    #[serde(flatten)]
    pub reading: &'a Reading,
    pub category: &'static str,
    pub color: &'static str,
}

impl<'a> ReadingView<'a> {
    pub fn new(reading: &'a Reading, category: BloodPressureCategory) -> Self {
        Self {
            reading,
            category: category.label(),
            color: category.color(),
        }
    }
}

/// `120/80 mmHg`, with the pulse appended when present
pub fn pressure(reading: &Reading) -> String {
    match reading.pulse {
        Some(pulse) => format!("{}/{} mmHg, pulse {} bpm", reading.systolic, reading.diastolic, pulse),
        None => format!("{}/{} mmHg", reading.systolic, reading.diastolic),
    }
}

pub fn write_reading<W: Write>(
    out: &mut W,
    reading: &Reading,
    category: BloodPressureCategory,
) -> io::Result<()> {
    writeln!(
        out,
        "{}  {}  {}  [{}]",
        reading.date,
        pressure(reading),
        category,
        reading.id
    )
}

pub fn write_field_errors<W: Write>(out: &mut W, errors: &FieldErrors) -> io::Result<()> {
    writeln!(out, "Reading not saved:")?;
    for (field, message) in errors.iter() {
        writeln!(out, "  {}: {}", field, message)?;
    }
    Ok(())
}

pub fn write_latest<W: Write>(out: &mut W, latest: Option<&LatestReading>) -> io::Result<()> {
    match latest {
        None => writeln!(out, "{}", NO_READINGS_YET),
        Some(latest) => writeln!(
            out,
            "Latest: {} on {} ({}, {})",
            pressure(&latest.reading),
            latest.reading.date,
            latest.category,
            latest.category.color()
        ),
    }
}

/// Nothing is printed when there is no trend to report
pub fn write_trend<W: Write>(out: &mut W, trend: Option<&WeeklyTrend>) -> io::Result<()> {
    match trend {
        Some(trend) => writeln!(out, "{}", trend.message()),
        None => Ok(()),
    }
}

pub fn write_chart<W: Write>(out: &mut W, series: &DailySeries, window: TrendWindow) -> io::Result<()> {
    match series {
        DailySeries::NoReadings => writeln!(out, "{}", NO_DATA_AVAILABLE),
        DailySeries::NoDataInWindow => {
            writeln!(out, "No readings in the last {} days.", window.days())
        }
        DailySeries::Points(points) => {
            writeln!(out, "Daily averages, last {}:", window)?;
            for point in points {
                let noun = if point.reading_count == 1 { "reading" } else { "readings" };
                writeln!(
                    out,
                    "{}  {}/{}  ({} {})",
                    point.date.format("%Y-%m-%d"),
                    point.systolic,
                    point.diastolic,
                    point.reading_count,
                    noun
                )?;
            }
            Ok(())
        }
    }
}
