// Repository module structure
pub mod errors;
mod readings;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use readings::{ReadingRepositoryTrait, ReadingStore, READINGS_KEY};

// Re-export the generated mock for dependent crates' tests
#[cfg(any(test, feature = "mock"))]
pub use readings::MockReadingRepositoryTrait;
