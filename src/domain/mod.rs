//! Domain layer containing core types, traits, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, DatabaseError};
pub use traits::DatabaseAdapter;
pub use types::{DatabaseInfo, DatabaseStatus, DriverKind, HealthResponse, HealthStatus};
