use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::entities::reading::Reading;
use crate::entities::trend::{DailyAverage, DailySeries, TrendDirection, TrendWindow, WeeklyTrend};

/// Most points a daily series ever holds
pub const MAX_DAILY_POINTS: usize = 30;

/// Readings per week-over-week comparison window
pub const TREND_WINDOW_SIZE: usize = 7;

/// Systolic changes smaller than this (mmHg) are treated as noise
pub const TREND_NOISE_THRESHOLD: f64 = 2.0;

/// Sort readings newest first. Readings with an unreadable date go last.
pub fn sort_newest_first(readings: &mut [Reading]) {
    readings.sort_by(|a, b| b.taken_at().cmp(&a.taken_at()));
}

/// Per-day systolic/diastolic averages for readings taken within `window` of `now`.
///
/// A reading is kept when its date is at or after `now` minus the window. Days
/// come out oldest first, capped to the most recent [`MAX_DAILY_POINTS`].
pub fn daily_averages(readings: &[Reading], window: TrendWindow, now: NaiveDateTime) -> DailySeries {
    if readings.is_empty() {
        return DailySeries::NoReadings;
    }

    let cutoff = now - Duration::days(window.days());

    // day -> (systolic sum, diastolic sum, count)
    let mut by_day: BTreeMap<NaiveDate, (u32, u32, usize)> = BTreeMap::new();
    for reading in readings {
        let Some(taken) = reading.taken_at() else {
            debug!("Skipping reading {} with unreadable date {:?}", reading.id, reading.date);
            continue;
        };
        if taken < cutoff {
            continue;
        }

        let bucket = by_day.entry(taken.date()).or_insert((0, 0, 0));
        bucket.0 += u32::from(reading.systolic);
        bucket.1 += u32::from(reading.diastolic);
        bucket.2 += 1;
    }

    if by_day.is_empty() {
        return DailySeries::NoDataInWindow;
    }

    let skip = by_day.len().saturating_sub(MAX_DAILY_POINTS);
    let points = by_day
        .into_iter()
        .skip(skip)
        .map(|(date, (systolic_sum, diastolic_sum, count))| DailyAverage {
            date,
            systolic: rounded_mean(systolic_sum, count),
            diastolic: rounded_mean(diastolic_sum, count),
            reading_count: count,
        })
        .collect();

    DailySeries::Points(points)
}

/// Compare mean systolic of the 7 most recent readings against the 7 before.
///
/// `readings` must already be sorted newest first. Returns `None` when there
/// are fewer than 8 readings or the change is under the noise threshold.
pub fn weekly_trend(readings: &[Reading]) -> Option<WeeklyTrend> {
    if readings.len() < TREND_WINDOW_SIZE {
        return None;
    }

    let recent = &readings[..TREND_WINDOW_SIZE];
    let previous = &readings[TREND_WINDOW_SIZE..readings.len().min(TREND_WINDOW_SIZE * 2)];
    if previous.is_empty() {
        return None;
    }

    let delta = mean_systolic(recent) - mean_systolic(previous);
    if delta.abs() < TREND_NOISE_THRESHOLD {
        return None;
    }

    let direction = if delta < 0.0 {
        TrendDirection::Improving
    } else {
        TrendDirection::Worsening
    };

    Some(WeeklyTrend { direction, delta })
}

fn mean_systolic(readings: &[Reading]) -> f64 {
    let sum: f64 = readings.iter().map(|r| f64::from(r.systolic)).sum();
    sum / readings.len() as f64
}

fn rounded_mean(sum: u32, count: usize) -> u16 {
    (f64::from(sum) / count as f64).round() as u16
}
