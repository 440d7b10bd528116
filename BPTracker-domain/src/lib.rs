// BPTracker Domain
// This crate contains the business logic for the BPTracker application

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Re-export the storage configuration from bp_tracker_data for convenience
pub use bp_tracker_data::storage::{StorageBackend, StorageConfig};

// Testing utilities - only available in tests or with the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
