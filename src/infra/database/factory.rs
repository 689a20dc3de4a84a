//! Driver selection and adapter construction.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{AppError, DatabaseAdapter, DriverKind};

use super::config::DatabaseConfig;
use super::sqlx_adapter::SqlxAdapter;
use super::tokio_pg_adapter::TokioPostgresAdapter;

/// Single decision point translating configuration into a concrete adapter.
///
/// Centralizing driver selection here keeps every other component (service,
/// handlers, tests) programming against [`DatabaseAdapter`] only.
pub struct AdapterFactory {
    config: DatabaseConfig,
}

impl AdapterFactory {
    #[must_use]
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// Resolves the configured driver selector.
    ///
    /// An absent or unrecognized value falls back to [`DriverKind::Sqlx`]
    /// with a logged warning; selection never fails.
    pub fn driver_kind(&self) -> DriverKind {
        match self.config.driver.as_deref() {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(
                    driver = raw,
                    "unrecognized DATABASE_DRIVER value, defaulting to sqlx"
                );
                DriverKind::default()
            }),
            None => {
                warn!("DATABASE_DRIVER not set, defaulting to sqlx");
                DriverKind::default()
            }
        }
    }

    /// Instantiates the adapter matching the configured driver.
    ///
    /// # Errors
    ///
    /// Only fails on a construction-time configuration error (empty
    /// connection string); an invalid driver selector is not an error here.
    pub fn create_adapter(&self) -> Result<Arc<dyn DatabaseAdapter>, AppError> {
        let kind = self.driver_kind();
        info!(driver = %kind, "creating database adapter");
        self.build(kind)
    }

    /// Strict variant for administrative and test use: the selector must
    /// name a supported driver exactly.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::UnsupportedDriver` for any literal outside
    /// the supported set, plus the construction errors of `create_adapter`.
    pub fn create_adapter_by_kind(&self, kind: &str) -> Result<Arc<dyn DatabaseAdapter>, AppError> {
        let kind: DriverKind = kind.parse().map_err(AppError::from)?;
        self.build(kind)
    }

    pub fn is_sqlx(&self) -> bool {
        self.driver_kind() == DriverKind::Sqlx
    }

    pub fn is_tokio_postgres(&self) -> bool {
        self.driver_kind() == DriverKind::TokioPostgres
    }

    fn build(&self, kind: DriverKind) -> Result<Arc<dyn DatabaseAdapter>, AppError> {
        let adapter: Arc<dyn DatabaseAdapter> = match kind {
            DriverKind::Sqlx => Arc::new(SqlxAdapter::new(self.config.clone())?),
            DriverKind::TokioPostgres => Arc::new(TokioPostgresAdapter::new(self.config.clone())?),
        };
        Ok(adapter)
    }
}
