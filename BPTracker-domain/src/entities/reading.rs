use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Domain model for a blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Unique identifier, assigned by the store
    pub id: String,

    /// Systolic blood pressure in mmHg (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure in mmHg (the lower number)
    pub diastolic: u16,

    /// Optional pulse rate in beats per minute
    pub pulse: Option<u16>,

    /// ISO calendar date or date-time the reading was taken
    pub date: String,
}

impl Reading {
    /// When the reading was taken, in local time. `None` for an unreadable date.
    pub fn taken_at(&self) -> Option<NaiveDateTime> {
        parse_reading_date(&self.date)
    }

    /// Local calendar day the reading belongs to
    pub fn day(&self) -> Option<NaiveDate> {
        self.taken_at().map(|taken| taken.date())
    }
}

/// Parse a reading date into local wall-clock time.
///
/// Accepts `YYYY-MM-DD` (midnight), naive `YYYY-MM-DDTHH:MM[:SS[.f]]`, and
/// RFC 3339 timestamps, which are shifted into the local time zone.
pub fn parse_reading_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive);
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// The user-editable fields of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingField {
    Systolic,
    Diastolic,
    Pulse,
    Date,
}

impl ReadingField {
    /// Field name as used in error maps
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingField::Systolic => "systolic",
            ReadingField::Diastolic => "diastolic",
            ReadingField::Pulse => "pulse",
            ReadingField::Date => "date",
        }
    }

    /// Capitalized name for messages
    pub fn label(&self) -> &'static str {
        match self {
            ReadingField::Systolic => "Systolic",
            ReadingField::Diastolic => "Diastolic",
            ReadingField::Pulse => "Pulse",
            ReadingField::Date => "Date",
        }
    }

    /// Map a struct field name back to the field
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "systolic" => Some(ReadingField::Systolic),
            "diastolic" => Some(ReadingField::Diastolic),
            "pulse" => Some(ReadingField::Pulse),
            "date" => Some(ReadingField::Date),
            _ => None,
        }
    }
}

impl fmt::Display for ReadingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures keyed by field, one human-readable message per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ReadingField, String>);

impl FieldErrors {
    /// An empty error map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, replacing any earlier one
    pub fn insert(&mut self, field: ReadingField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message recorded for `field`
    pub fn get(&self, field: ReadingField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: ReadingField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields and messages in field order
    pub fn iter(&self) -> impl Iterator<Item = (ReadingField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Merge `other` into `self`; messages from `other` win
    pub fn extend(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// A reading as submitted, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ReadingCandidate {
    /// Systolic blood pressure in mmHg
    #[validate(
        required(message = "Systolic is required"),
        range(min = 60, max = 250, message = "Systolic must be between 60-250")
    )]
    pub systolic: Option<i32>,

    /// Diastolic blood pressure in mmHg
    #[validate(
        required(message = "Diastolic is required"),
        range(min = 40, max = 150, message = "Diastolic must be between 40-150")
    )]
    pub diastolic: Option<i32>,

    /// Optional pulse rate in beats per minute
    #[validate(range(min = 30, max = 200, message = "Pulse must be between 30-200 bpm"))]
    pub pulse: Option<i32>,

    /// Date the reading was taken
    #[validate(required(message = "Date is required"))]
    pub date: Option<String>,
}

impl From<&Reading> for ReadingCandidate {
    fn from(reading: &Reading) -> Self {
        Self {
            systolic: Some(i32::from(reading.systolic)),
            diastolic: Some(i32::from(reading.diastolic)),
            pulse: reading.pulse.map(i32::from),
            date: Some(reading.date.clone()),
        }
    }
}

/// Raw text fields as typed into an entry form. Blank means missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingForm {
    pub systolic: String,
    pub diastolic: String,
    pub pulse: String,
    pub date: String,
}

impl ReadingForm {
    /// A blank form dated `today`
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// Convert text into a candidate, reporting fields that are not whole numbers
    pub fn to_candidate(&self) -> (ReadingCandidate, FieldErrors) {
        let mut errors = FieldErrors::new();

        let candidate = ReadingCandidate {
            systolic: parse_whole_number(ReadingField::Systolic, &self.systolic, &mut errors),
            diastolic: parse_whole_number(ReadingField::Diastolic, &self.diastolic, &mut errors),
            pulse: parse_whole_number(ReadingField::Pulse, &self.pulse, &mut errors),
            date: Some(self.date.trim())
                .filter(|date| !date.is_empty())
                .map(str::to_string),
        };

        (candidate, errors)
    }
}

/// Pre-fill a form for editing; only the calendar date part is kept
impl From<&Reading> for ReadingForm {
    fn from(reading: &Reading) -> Self {
        let date = reading.date.split('T').next().unwrap_or_default();
        Self {
            systolic: reading.systolic.to_string(),
            diastolic: reading.diastolic.to_string(),
            pulse: reading.pulse.map(|p| p.to_string()).unwrap_or_default(),
            date: date.to_string(),
        }
    }
}

fn parse_whole_number(field: ReadingField, raw: &str, errors: &mut FieldErrors) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse::<i32>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.insert(field, format!("{} must be a whole number", field.label()));
            None
        }
    }
}

/// A reading that passed validation and may be stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidReading {
    systolic: u16,
    diastolic: u16,
    pulse: Option<u16>,
    date: String,
}

impl ValidReading {
    pub(crate) fn new(systolic: u16, diastolic: u16, pulse: Option<u16>, date: String) -> Self {
        Self {
            systolic,
            diastolic,
            pulse,
            date,
        }
    }

    pub fn systolic(&self) -> u16 {
        self.systolic
    }

    pub fn diastolic(&self) -> u16 {
        self.diastolic
    }

    pub fn pulse(&self) -> Option<u16> {
        self.pulse
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}
