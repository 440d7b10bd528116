// Domain entities and value objects
pub mod category;
pub mod conversions;
pub mod reading;
pub mod trend;

// Re-export common types for easier imports
pub use category::BloodPressureCategory;
pub use reading::{
    parse_reading_date, FieldErrors, Reading, ReadingCandidate, ReadingField, ReadingForm,
    ValidReading,
};
pub use trend::{DailyAverage, DailySeries, TrendDirection, TrendWindow, WeeklyTrend};
