// Testing utilities for the domain layer
// This module is only available in tests or when the "mock" feature is enabled

use chrono::{NaiveDate, NaiveDateTime};

use bp_tracker_data::repository::ReadingStore;
use bp_tracker_data::storage::MemoryStore;

pub use bp_tracker_data::repository::MockReadingRepositoryTrait;

use crate::entities::reading::{Reading, ReadingCandidate};
use crate::services::clock::Clock;
use crate::services::readings::ReadingService;

/// A clock stopped at one local instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Stop the clock at `YYYY-MM-DDTHH:MM:SS`
    ///
    /// Panics on a malformed timestamp; only meant for tests.
    pub fn at(timestamp: &str) -> Self {
        let now = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S")
            .unwrap_or_else(|e| panic!("invalid fixed clock timestamp {:?}: {}", timestamp, e));
        Self(now)
    }

    /// Stop the clock at noon on `date`
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_hms_opt(12, 0, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// A candidate without pulse
pub fn candidate(systolic: i32, diastolic: i32, date: &str) -> ReadingCandidate {
    ReadingCandidate {
        systolic: Some(systolic),
        diastolic: Some(diastolic),
        pulse: None,
        date: Some(date.to_string()),
    }
}

/// A stored-looking reading with a fixed id
pub fn reading(id: &str, systolic: u16, diastolic: u16, date: &str) -> Reading {
    Reading {
        id: id.to_string(),
        systolic,
        diastolic,
        pulse: None,
        date: date.to_string(),
    }
}

/// A service over an empty in-memory store
pub fn create_memory_reading_service(
    clock: FixedClock,
) -> ReadingService<ReadingStore<MemoryStore>, FixedClock> {
    ReadingService::new(ReadingStore::new(MemoryStore::new()), clock)
}
