//! Infrastructure layer implementations.

pub mod database;
pub mod observability;

pub use database::{
    AdapterFactory, DatabaseConfig, SqlxAdapter, TokioPgPool, TokioPostgresAdapter,
};
pub use observability::init_tracing;
