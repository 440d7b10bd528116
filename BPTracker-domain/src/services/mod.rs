pub mod classification;
pub mod clock;
pub mod readings;
pub mod trends;
pub mod validation;

// Domain services
// This module contains business logic implementations.

// Re-export the service facade and factory function
pub use readings::{
    create_default_reading_service, DefaultReadingService, LatestReading, ReadingService,
    ReadingServiceError, Submission,
};

pub use classification::categorize_blood_pressure;
pub use clock::{Clock, SystemClock};
pub use trends::{daily_averages, sort_newest_first, weekly_trend};
pub use validation::{validate_form, validate_reading};
