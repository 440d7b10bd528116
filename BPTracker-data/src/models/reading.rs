use serde::{Deserialize, Serialize};

/// Storage model for a blood pressure reading
///
/// This is the exact shape of one element of the persisted JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReading {
    /// Unique identifier for the reading
    pub id: String,

    /// Systolic blood pressure in mmHg (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure in mmHg (the lower number)
    pub diastolic: u16,

    /// Optional pulse rate in beats per minute, persisted as `null` when absent
    #[serde(default)]
    pub pulse: Option<u16>,

    /// ISO calendar date or date-time the reading was taken
    pub date: String,
}

/// Input data for creating or replacing a blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReading {
    /// Systolic blood pressure in mmHg
    pub systolic: u16,

    /// Diastolic blood pressure in mmHg
    pub diastolic: u16,

    /// Optional pulse rate in beats per minute
    pub pulse: Option<u16>,

    /// ISO calendar date or date-time the reading was taken
    pub date: String,
}

impl NewReading {
    /// Attach an identifier, producing the storage record
    pub fn with_id(self, id: impl Into<String>) -> StoredReading {
        StoredReading {
            id: id.into(),
            systolic: self.systolic,
            diastolic: self.diastolic,
            pulse: self.pulse,
            date: self.date,
        }
    }
}
