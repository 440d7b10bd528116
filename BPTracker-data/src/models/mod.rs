// Data storage models
pub mod reading;
