//! Concrete database adapter implementations and their factory.
//!
//! Both adapters implement the `DatabaseAdapter` trait defined in the
//! domain layer; nothing outside this module depends on a concrete driver.

pub mod config;
pub mod factory;
pub mod sqlx_adapter;
pub mod tokio_pg_adapter;

pub(crate) mod status;

pub use config::DatabaseConfig;
pub use factory::AdapterFactory;
pub use sqlx_adapter::SqlxAdapter;
pub use tokio_pg_adapter::{TokioPgPool, TokioPostgresAdapter};

/// Lightweight round-trip query used to confirm live connectivity.
pub(crate) const HEALTH_PROBE_SQL: &str = "SELECT 1";

/// Identity query behind `database_info`. Everything is cast to text so
/// both drivers decode the row identically.
pub(crate) const DATABASE_INFO_SQL: &str = "SELECT current_database()::text AS database_name, \
     current_user::text AS current_user, version()::text AS server_version";
