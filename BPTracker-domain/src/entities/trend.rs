use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trailing window for daily charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendWindow {
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
}

impl TrendWindow {
    /// Window length in days
    pub fn days(&self) -> i64 {
        match self {
            TrendWindow::Week => 7,
            TrendWindow::Month => 30,
        }
    }
}

impl TryFrom<u32> for TrendWindow {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(TrendWindow::Week),
            30 => Ok(TrendWindow::Month),
            other => Err(format!("Unsupported window of {} days, expected 7 or 30", other)),
        }
    }
}

impl fmt::Display for TrendWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.days())
    }
}

/// Averages for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAverage {
    /// Local calendar day
    pub date: NaiveDate,

    /// Mean systolic, rounded to the nearest mmHg
    pub systolic: u16,

    /// Mean diastolic, rounded to the nearest mmHg
    pub diastolic: u16,

    /// Number of readings averaged
    pub reading_count: usize,
}

/// Result of bucketing readings by day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "points", rename_all = "snake_case")]
pub enum DailySeries {
    /// There are no readings at all
    NoReadings,

    /// There are readings, but none inside the window
    NoDataInWindow,

    /// One point per day, oldest first
    Points(Vec<DailyAverage>),
}

impl DailySeries {
    /// Points to plot, empty for either no-data state
    pub fn points(&self) -> &[DailyAverage] {
        match self {
            DailySeries::Points(points) => points,
            _ => &[],
        }
    }
}

/// Direction of the week-over-week systolic change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Systolic went down
    Improving,
    /// Systolic went up
    Worsening,
}

/// Week-over-week systolic trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTrend {
    pub direction: TrendDirection,

    /// Mean systolic of the recent window minus that of the previous window
    pub delta: f64,
}

impl WeeklyTrend {
    pub fn is_improving(&self) -> bool {
        self.direction == TrendDirection::Improving
    }

    /// Banner text
    pub fn message(&self) -> &'static str {
        match self.direction {
            TrendDirection::Improving => "Your BP is improving this week!",
            TrendDirection::Worsening => "Your BP is slightly higher this week",
        }
    }
}
