//! tokio-postgres-backed adapter implementation.

use std::any::Any;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use bb8_postgres::PostgresConnectionManager;
use secrecy::ExposeSecret;
use tokio_postgres::NoTls;
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    AppError, DatabaseAdapter, DatabaseError, DatabaseInfo, DatabaseStatus, DriverKind,
};

use super::config::DatabaseConfig;
use super::status::StatusCell;
use super::{DATABASE_INFO_SQL, HEALTH_PROBE_SQL};

/// Connection pool type for the tokio-postgres backend.
pub type TokioPgPool = bb8::Pool<PostgresConnectionManager<NoTls>>;

/// Adapter wrapping tokio-postgres behind a bb8 connection pool.
///
/// Unlike the sqlx variant, this backend applies the configured pool knobs
/// (max connections, acquire timeout, idle timeout) when building the pool.
#[derive(Debug)]
pub struct TokioPostgresAdapter {
    config: DatabaseConfig,
    pool: RwLock<Option<TokioPgPool>>,
    status: StatusCell,
}

impl TokioPostgresAdapter {
    /// Creates a disconnected adapter from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the connection string is empty.
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
    #[must_use]
    pub fn pool(&self) -> Option<TokioPgPool> {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_pool(&self, pool: Option<TokioPgPool>) -> Option<TokioPgPool> {
        let mut slot = self.pool.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, pool)
    }
}

#[async_trait]
impl DatabaseAdapter for TokioPostgresAdapter {
    fn kind(&self) -> DriverKind {
        DriverKind::TokioPostgres
    }

    #[instrument(skip(self))]
    async fn connect(&self) -> Result<(), AppError> {
        info!("Connecting to PostgreSQL via tokio-postgres...");
        self.status.set(DatabaseStatus::Connecting);

        let manager = PostgresConnectionManager::new_from_stringlike(
            self.config.connection_string.expose_secret(),
            NoTls,
        )
        .map_err(|e| {
            self.status.set(DatabaseStatus::Error);
            DatabaseError::Connection(e.to_string())
        })?;

        let pool = bb8::Pool::builder()
            .max_size(self.config.max_connections)
            .connection_timeout(self.config.acquire_timeout)
            .idle_timeout(Some(self.config.idle_timeout))
            .build(manager)
            .await
            .map_err(|e| {
                self.status.set(DatabaseStatus::Error);
                DatabaseError::Connection(e.to_string())
            })?;

        self.store_pool(Some(pool));

        // bb8 hands out connections lazily; prove reachability now.
        if let Err(e) = self.execute_raw(HEALTH_PROBE_SQL).await {
            self.status.set(DatabaseStatus::Error);
            return Err(e);
        }

        self.status.set(DatabaseStatus::Connected);
        info!("Connected to PostgreSQL via tokio-postgres");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn disconnect(&self) -> Result<(), AppError> {
        match self.store_pool(None) {
            // bb8 has no explicit close; dropping the last handle tears the
            // pooled connections down.
            Some(pool) => {
                drop(pool);
                info!("tokio-postgres pool released");
            }
            None => debug!("disconnect called with no active tokio-postgres pool"),
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
                warn!(error = %e, "tokio-postgres health probe failed");
                self.status.set(DatabaseStatus::Error);
                false
            }
        }
    }

    async fn database_info(&self) -> Option<DatabaseInfo> {
        let pool = self.pool()?;

        let conn = match pool.get().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "tokio-postgres pool checkout failed");
                return None;
            }
        };

        let row = match conn.query_one(DATABASE_INFO_SQL, &[]).await {
            Ok(row) => row,
            Err(e) => {
                warn!(error = %e, "tokio-postgres database info query failed");
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
                warn!("tokio-postgres database info row had unexpected shape");
                None
            }
        }
    }

    async fn execute_raw(&self, sql: &str) -> Result<u64, AppError> {
        let pool = self.pool().ok_or_else(|| {
            DatabaseError::NotInitialized(
                "no active tokio-postgres pool; call connect() first".to_string(),
            )
        })?;

        let conn = pool.get().await.map_err(DatabaseError::from)?;
        let rows = conn.execute(sql, &[]).await.map_err(DatabaseError::from)?;
        Ok(rows)
    }

    fn status(&self) -> DatabaseStatus {
        self.status.get()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
