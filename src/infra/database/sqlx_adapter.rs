//! sqlx-backed adapter implementation.

use std::any::Any;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    AppError, DatabaseAdapter, DatabaseError, DatabaseInfo, DatabaseStatus, DriverKind,
};

use super::config::DatabaseConfig;
use super::status::StatusCell;
use super::{DATABASE_INFO_SQL, HEALTH_PROBE_SQL};

/// Adapter wrapping a sqlx `PgPool`.
///
/// This backend keeps the `PgPoolOptions` defaults and lets the driver
/// manage its own pool sizing; only the connection string comes from
/// configuration. The tokio-postgres variant is the one that applies
/// the configured pool knobs.
#[derive(Debug)]
pub struct SqlxAdapter {
    config: DatabaseConfig,
    pool: RwLock<Option<PgPool>>,
    status: StatusCell,
}

impl SqlxAdapter {
    /// Creates a disconnected adapter from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the connection string is empty;
    /// an adapter without one can never connect, so this fails at
    /// construction time.
    pub fn new(config: DatabaseConfig) -> Result<Self, AppError> {
        if config.connection_string.expose_secret().is_empty() {
            return Err(crate::domain::ConfigError::InvalidValue {
                key: "DATABASE_URL".to_string(),
                message: "connection string must not be empty".to_string(),
            }
            .into());
        }
        Ok(Self {
            config,
            pool: RwLock::new(None),
            status: StatusCell::default(),
        })
    }

    /// Returns a handle to the underlying pool, or `None` when disconnected.
    ///
    /// `PgPool` is a cheap clone over shared pool state, so callers never
    /// take ownership of the adapter's reference.
    #[must_use]
    pub fn pool(&self) -> Option<PgPool> {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_pool(&self, pool: Option<PgPool>) -> Option<PgPool> {
        let mut slot = self.pool.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, pool)
    }
}

#[async_trait]
impl DatabaseAdapter for SqlxAdapter {
    fn kind(&self) -> DriverKind {
        DriverKind::Sqlx
    }

    #[instrument(skip(self))]
    async fn connect(&self) -> Result<(), AppError> {
        info!("Connecting to PostgreSQL via sqlx...");
        self.status.set(DatabaseStatus::Connecting);

        let pool = PgPoolOptions::new()
            .connect(self.config.connection_string.expose_secret())
            .await
            .map_err(|e| {
                self.status.set(DatabaseStatus::Error);
                DatabaseError::Connection(e.to_string())
            })?;

        self.store_pool(Some(pool));

        // Round trip before reporting connected; a pool can be built lazily
        // without any live connection behind it.
        if let Err(e) = self.execute_raw(HEALTH_PROBE_SQL).await {
            self.status.set(DatabaseStatus::Error);
            return Err(e);
        }

        self.status.set(DatabaseStatus::Connected);
        info!("Connected to PostgreSQL via sqlx");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn disconnect(&self) -> Result<(), AppError> {
        match self.store_pool(None) {
            Some(pool) => {
                pool.close().await;
                info!("sqlx pool closed");
            }
            None => debug!("disconnect called with no active sqlx pool"),
        }
        self.status.set(DatabaseStatus::Disconnected);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        if self.pool().is_none() {
            self.status.set(DatabaseStatus::Error);
            return false;
        }

        match self.execute_raw(HEALTH_PROBE_SQL).await {
            Ok(_) => {
                self.status.set(DatabaseStatus::Connected);
                true
            }
            Err(e) => {
                warn!(error = %e, "sqlx health probe failed");
                self.status.set(DatabaseStatus::Error);
                false
            }
        }
    }

    async fn database_info(&self) -> Option<DatabaseInfo> {
        let pool = self.pool()?;

        let row = match sqlx::query(DATABASE_INFO_SQL).fetch_one(&pool).await {
            Ok(row) => row,
            Err(e) => {
                warn!(error = %e, "sqlx database info query failed");
                return None;
            }
        };

        match (
            row.try_get("database_name"),
            row.try_get("current_user"),
            row.try_get("server_version"),
        ) {
            (Ok(database_name), Ok(current_user), Ok(server_version)) => Some(DatabaseInfo {
                database_name,
                current_user,
                server_version,
            }),
            _ => {
                warn!("sqlx database info row had unexpected shape");
                None
            }
        }
    }

    async fn execute_raw(&self, sql: &str) -> Result<u64, AppError> {
        let pool = self.pool().ok_or_else(|| {
            DatabaseError::NotInitialized("no active sqlx pool; call connect() first".to_string())
        })?;

        let result = sqlx::query(sql)
            .execute(&pool)
            .await
            .map_err(DatabaseError::from)?;

        Ok(result.rows_affected())
    }

    fn status(&self) -> DatabaseStatus {
        self.status.get()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
