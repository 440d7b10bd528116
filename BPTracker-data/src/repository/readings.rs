use tracing::{debug, error, warn};
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::models::reading::{NewReading, StoredReading};
use crate::storage::KeyValueStore;

/// Storage key holding the serialized reading collection
pub const READINGS_KEY: &str = "bp_readings";

/// Repository trait for blood pressure readings
///
/// Every operation is synchronous; a read issued after a write observes it.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ReadingRepositoryTrait {
    /// Store a new reading under a freshly assigned id
    fn create(&mut self, reading: NewReading) -> Result<StoredReading, RepositoryError>;

    /// All stored readings, in no particular order
    fn list(&self) -> Result<Vec<StoredReading>, RepositoryError>;

    /// Look up a single reading
    fn find(&self, id: &str) -> Result<Option<StoredReading>, RepositoryError>;

    /// Replace every field but the id. Unknown ids are ignored.
    fn update(&mut self, id: &str, reading: NewReading) -> Result<(), RepositoryError>;

    /// Remove a reading. Unknown ids are ignored.
    fn delete(&mut self, id: &str) -> Result<(), RepositoryError>;
}

/// Reading repository persisting the whole collection as one JSON array
#[derive(Debug, Clone, Default)]
pub struct ReadingStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ReadingStore<S> {
    /// Create a repository on top of a key-value backend
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Give back the underlying backend
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load the persisted collection, treating unparseable data as empty
    fn load(&self) -> Result<Vec<StoredReading>, RepositoryError> {
        let Some(raw) = self.store.read(READINGS_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<StoredReading>>(&raw) {
            Ok(readings) => Ok(readings),
            Err(e) => {
                warn!("Stored readings are unreadable ({}), starting from an empty collection", e);
                Ok(Vec::new())
            }
        }
    }

    fn save(&mut self, readings: &[StoredReading]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(readings)?;
        self.store.write(READINGS_KEY, &json).map_err(|e| {
            error!("Failed to persist readings: {}", e);
            RepositoryError::Storage(e)
        })
    }
}

impl<S: KeyValueStore> ReadingRepositoryTrait for ReadingStore<S> {
    fn create(&mut self, reading: NewReading) -> Result<StoredReading, RepositoryError> {
        let mut readings = self.load()?;

        let stored = reading.with_id(Uuid::new_v4().to_string());
        debug!("Storing blood pressure reading: id={}", stored.id);

        readings.push(stored.clone());
        self.save(&readings)?;

        Ok(stored)
    }

    fn list(&self) -> Result<Vec<StoredReading>, RepositoryError> {
        self.load()
    }

    fn find(&self, id: &str) -> Result<Option<StoredReading>, RepositoryError> {
        Ok(self.load()?.into_iter().find(|r| r.id == id))
    }

    fn update(&mut self, id: &str, reading: NewReading) -> Result<(), RepositoryError> {
        let mut readings = self.load()?;

        let Some(slot) = readings.iter_mut().find(|r| r.id == id) else {
            debug!("Update ignored, no reading with id={}", id);
            return Ok(());
        };

        *slot = reading.with_id(id);
        debug!("Updated blood pressure reading: id={}", id);
        self.save(&readings)
    }

    fn delete(&mut self, id: &str) -> Result<(), RepositoryError> {
        let mut readings = self.load()?;
        let before = readings.len();
        readings.retain(|r| r.id != id);

        if readings.len() == before {
            debug!("Delete ignored, no reading with id={}", id);
            return Ok(());
        }

        debug!("Deleted blood pressure reading: id={}", id);
        self.save(&readings)
    }
}
