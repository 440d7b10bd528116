use bp_tracker_data::models::reading::{NewReading, StoredReading};

use crate::entities::reading::{Reading, ValidReading};

/// Conversion functions between domain entities and data models
/// These follow the pattern convert_to_[target_layer]_[model_name]

/// Convert from data model to domain entity for a reading
pub fn convert_to_domain_reading(data_reading: StoredReading) -> Reading {
    Reading {
        id: data_reading.id,
        systolic: data_reading.systolic,
        diastolic: data_reading.diastolic,
        pulse: data_reading.pulse,
        date: data_reading.date,
    }
}

/// Convert a validated reading to the data model used for create and update
pub fn convert_to_data_new_reading(reading: &ValidReading) -> NewReading {
    NewReading {
        systolic: reading.systolic(),
        diastolic: reading.diastolic(),
        pulse: reading.pulse(),
        date: reading.date().to_string(),
    }
}
