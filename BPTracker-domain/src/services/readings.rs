use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use bp_tracker_data::repository::{ReadingRepositoryTrait, ReadingStore, RepositoryError};
use bp_tracker_data::storage::{open_store, KeyValueStore, StorageConfig};

use crate::entities::category::BloodPressureCategory;
use crate::entities::conversions;
use crate::entities::reading::{FieldErrors, Reading, ReadingCandidate, ReadingForm, ValidReading};
use crate::entities::trend::{DailySeries, TrendWindow, WeeklyTrend};
use crate::services::classification::categorize_blood_pressure;
use crate::services::clock::{Clock, SystemClock};
use crate::services::trends::{daily_averages, sort_newest_first, weekly_trend};
use crate::services::validation::{validate_form, validate_reading};

/// Reading service errors
#[derive(Debug, Error)]
pub enum ReadingServiceError {
    /// Submitted fields failed validation; nothing was stored
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    /// Persistence failed
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ReadingServiceError {
    /// Field errors, when this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ReadingServiceError::Validation(errors) => Some(errors),
            ReadingServiceError::Repository(_) => None,
        }
    }
}

/// What a successful submission did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A new reading was stored
    Created(Reading),
    /// An existing id was targeted; unknown ids leave the store untouched
    Updated(String),
}

/// Most recent reading with its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestReading {
    pub reading: Reading,
    pub category: BloodPressureCategory,
}

/// Entry point for the presentation layer
pub struct ReadingService<R: ReadingRepositoryTrait, C: Clock = SystemClock> {
    repository: R,
    clock: C,
}

/// Service over the configured local storage backend
pub type DefaultReadingService = ReadingService<ReadingStore<Box<dyn KeyValueStore>>, SystemClock>;

impl<R: ReadingRepositoryTrait, C: Clock> ReadingService<R, C> {
    /// Create a new reading service
    pub fn new(repository: R, clock: C) -> Self {
        Self { repository, clock }
    }

    /// Validate a candidate and store it, as a new reading or over `editing_id`
    pub fn submit(
        &mut self,
        candidate: &ReadingCandidate,
        editing_id: Option<&str>,
    ) -> Result<Submission, ReadingServiceError> {
        let valid = validate_reading(candidate, self.clock.today())
            .map_err(ReadingServiceError::Validation)?;
        self.store(&valid, editing_id)
    }

    /// Same as [`ReadingService::submit`] for raw form text
    pub fn submit_form(
        &mut self,
        form: &ReadingForm,
        editing_id: Option<&str>,
    ) -> Result<Submission, ReadingServiceError> {
        let valid = validate_form(form, self.clock.today()).map_err(ReadingServiceError::Validation)?;
        self.store(&valid, editing_id)
    }

    fn store(
        &mut self,
        valid: &ValidReading,
        editing_id: Option<&str>,
    ) -> Result<Submission, ReadingServiceError> {
        let data_reading = conversions::convert_to_data_new_reading(valid);

        match editing_id {
            Some(id) => {
                self.repository.update(id, data_reading)?;
                info!("Reading updated: id={}", id);
                Ok(Submission::Updated(id.to_string()))
            }
            None => {
                let stored = self.repository.create(data_reading)?;
                info!("Reading saved: id={}", stored.id);
                Ok(Submission::Created(conversions::convert_to_domain_reading(stored)))
            }
        }
    }

    /// Delete a reading. Confirmation is the caller's job; unknown ids are ignored.
    pub fn delete(&mut self, id: &str) -> Result<(), ReadingServiceError> {
        self.repository.delete(id)?;
        info!("Reading deleted: id={}", id);
        Ok(())
    }

    /// Look up one reading, e.g. to pre-fill an edit form
    pub fn find(&self, id: &str) -> Result<Option<Reading>, ReadingServiceError> {
        Ok(self
            .repository
            .find(id)?
            .map(conversions::convert_to_domain_reading))
    }

    /// All readings, newest first
    pub fn readings(&self) -> Result<Vec<Reading>, ReadingServiceError> {
        let mut readings: Vec<Reading> = self
            .repository
            .list()?
            .into_iter()
            .map(conversions::convert_to_domain_reading)
            .collect();

        sort_newest_first(&mut readings);
        debug!("Loaded {} readings", readings.len());
        Ok(readings)
    }

    /// Severity category for a reading
    pub fn get_severity(&self, reading: &Reading) -> BloodPressureCategory {
        categorize_blood_pressure(reading.systolic, reading.diastolic)
    }

    /// Most recent reading by date, classified
    pub fn latest(&self) -> Result<Option<LatestReading>, ReadingServiceError> {
        let latest = self.readings()?.into_iter().next().map(|reading| LatestReading {
            category: self.get_severity(&reading),
            reading,
        });
        Ok(latest)
    }

    /// Week-over-week systolic trend, `None` when there is nothing to report
    pub fn trend_banner(&self) -> Result<Option<WeeklyTrend>, ReadingServiceError> {
        Ok(weekly_trend(&self.readings()?))
    }

    /// Per-day averages for the chart over `window`
    pub fn chart(&self, window: TrendWindow) -> Result<DailySeries, ReadingServiceError> {
        let readings = self.readings()?;
        Ok(daily_averages(&readings, window, self.clock.now()))
    }

    /// The clock this service validates and aggregates against
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Create a reading service over the configured storage backend
pub fn create_default_reading_service(
    config: &StorageConfig,
) -> Result<DefaultReadingService, ReadingServiceError> {
    let store = open_store(config).map_err(RepositoryError::from)?;
    Ok(ReadingService::new(ReadingStore::new(store), SystemClock))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::reading::ReadingField;
    use crate::entities::trend::TrendDirection;
    use crate::testing::{self, candidate, FixedClock};
    use bp_tracker_data::repository::MockReadingRepositoryTrait;
    use bp_tracker_data::storage::MemoryStore;

    fn service() -> ReadingService<ReadingStore<MemoryStore>, FixedClock> {
        ReadingService::new(
            ReadingStore::new(MemoryStore::new()),
            FixedClock::at("2024-05-20T12:00:00"),
        )
    }

    fn created(submission: Submission) -> Reading {
        match submission {
            Submission::Created(reading) => reading,
            other => panic!("expected a created reading, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_creates_reading() {
        let mut service = service();
        let reading = created(service.submit(&candidate(120, 80, "2024-05-20"), None).unwrap());

        assert_eq!(reading.systolic, 120);
        assert_eq!(service.readings().unwrap(), vec![reading]);
    }

    #[test]
    fn test_invalid_submission_returns_field_errors() {
        let mut service = service();
        let err = service
            .submit(&candidate(130, 130, "2024-05-21"), None)
            .unwrap_err();

        let errors = err.field_errors().unwrap();
        assert!(errors.contains(ReadingField::Diastolic));
        assert!(errors.contains(ReadingField::Date));
        assert!(service.readings().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_submission_never_reaches_repository() {
        let mut repository = MockReadingRepositoryTrait::new();
        repository.expect_create().never();
        repository.expect_update().never();

        let mut service = ReadingService::new(repository, FixedClock::at("2024-05-20T12:00:00"));
        assert!(service.submit(&candidate(59, 40, "2024-05-01"), None).is_err());
        assert!(service.submit(&candidate(59, 40, "2024-05-01"), Some("id")).is_err());
    }

    #[test]
    fn test_edit_submission_updates_in_place() {
        let mut service = service();
        let original = created(service.submit(&candidate(150, 95, "2024-05-18"), None).unwrap());
        let other = created(service.submit(&candidate(118, 76, "2024-05-19"), None).unwrap());

        let submission = service
            .submit(&candidate(128, 78, "2024-05-18"), Some(&original.id))
            .unwrap();
        assert_eq!(submission, Submission::Updated(original.id.clone()));

        let updated = service.find(&original.id).unwrap().unwrap();
        assert_eq!((updated.systolic, updated.diastolic), (128, 78));
        assert_eq!(service.find(&other.id).unwrap(), Some(other));
    }

    #[test]
    fn test_edit_of_deleted_reading_is_silent() {
        let mut service = service();
        let reading = created(service.submit(&candidate(120, 80, "2024-05-18"), None).unwrap());
        service.delete(&reading.id).unwrap();

        service
            .submit(&candidate(121, 79, "2024-05-18"), Some(&reading.id))
            .unwrap();
        service.delete(&reading.id).unwrap();

        assert!(service.readings().unwrap().is_empty());
    }

    #[test]
    fn test_submit_form() {
        let mut service = service();
        let form = ReadingForm {
            systolic: "135".to_string(),
            diastolic: "85".to_string(),
            pulse: "70".to_string(),
            date: "2024-05-20".to_string(),
        };

        let reading = created(service.submit_form(&form, None).unwrap());
        assert_eq!(reading.pulse, Some(70));
        assert_eq!(service.get_severity(&reading), BloodPressureCategory::Stage1);
    }

    #[test]
    fn test_get_severity() {
        let service = service();
        assert_eq!(
            service.get_severity(&testing::reading("a", 119, 79, "2024-05-01")),
            BloodPressureCategory::Normal
        );
        assert_eq!(
            service.get_severity(&testing::reading("b", 150, 95, "2024-05-01")),
            BloodPressureCategory::Stage2
        );
    }

    #[test]
    fn test_latest_is_most_recent_by_date() {
        let mut service = service();
        assert_eq!(service.latest().unwrap(), None);

        service.submit(&candidate(150, 95, "2024-05-19"), None).unwrap();
        service.submit(&candidate(118, 76, "2024-05-20T07:00:00"), None).unwrap();
        service.submit(&candidate(125, 78, "2024-05-01"), None).unwrap();

        let latest = service.latest().unwrap().unwrap();
        assert_eq!(latest.reading.systolic, 118);
        assert_eq!(latest.category, BloodPressureCategory::Normal);
    }

    #[test]
    fn test_trend_banner() {
        let mut service = service();
        for day in 1..=14u32 {
            let systolic = if day > 7 { 130 } else { 140 };
            let date = format!("2024-05-{:02}", day);
            service.submit(&candidate(systolic, 80, &date), None).unwrap();
        }

        let trend = service.trend_banner().unwrap().unwrap();
        assert_eq!(trend.direction, TrendDirection::Improving);
        assert_eq!(trend.message(), "Your BP is improving this week!");
    }

    #[test]
    fn test_chart_distinguishes_empty_states() {
        let mut service = service();
        assert_eq!(service.chart(TrendWindow::Week).unwrap(), DailySeries::NoReadings);

        service.submit(&candidate(120, 80, "2024-05-01"), None).unwrap();
        assert_eq!(service.chart(TrendWindow::Week).unwrap(), DailySeries::NoDataInWindow);
        assert_eq!(service.chart(TrendWindow::Month).unwrap().points().len(), 1);
    }

    #[test]
    fn test_repository_failure_is_reported() {
        let mut repository = MockReadingRepositoryTrait::new();
        repository.expect_list().returning(|| {
            Err(RepositoryError::Storage(bp_tracker_data::storage::StorageError::Io(
                std::io::Error::new(std::io::ErrorKind::Other, "disk gone"),
            )))
        });

        let service = ReadingService::new(repository, FixedClock::at("2024-05-20T12:00:00"));
        let err = service.latest().unwrap_err();
        assert!(matches!(err, ReadingServiceError::Repository(_)));
        assert!(err.field_errors().is_none());
    }
}
