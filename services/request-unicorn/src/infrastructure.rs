// Infrastructure layer modules
pub mod clock;
pub mod config;
pub mod logging;
pub mod random_source;
pub mod ride_repository;

// Re-exports
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{DEFAULT_RIDES_TABLE, DynamoDbConfig, DynamoDbConfigError, RIDES_TABLE_ENV};
pub use logging::init_logging;
pub use random_source::{RandomSource, SeededRandomSource, ThreadRandomSource};
pub use ride_repository::{DynamoRideRepository, RepositoryError, RideRepository};
