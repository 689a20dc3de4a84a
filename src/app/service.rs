//! Database lifecycle service.
//!
//! This is the single owner of "the" adapter instance for the process. It
//! bridges startup/shutdown to adapter connect/disconnect and exposes an
//! always-safe facade to handlers, which never touch adapters directly.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

use crate::domain::{
    AppError, DatabaseAdapter, DatabaseError, DatabaseInfo, DatabaseStatus, DriverKind,
    HealthResponse, HealthStatus,
};
use crate::infra::AdapterFactory;

/// Lifecycle owner and facade over the selected database adapter.
///
/// The adapter slot starts empty; `init` populates it and `shutdown` drains
/// it. Facade methods report sentinel values (`false`, `None`,
/// `Disconnected`) while the slot is empty so that request-serving code can
/// never crash on a missing or degraded database.
pub struct DatabaseService {
    factory: AdapterFactory,
    adapter: RwLock<Option<Arc<dyn DatabaseAdapter>>>,
}

impl DatabaseService {
    #[must_use]
    pub fn new(factory: AdapterFactory) -> Self {
        Self {
            factory,
            adapter: RwLock::new(None),
        }
    }

    /// Creates the configured adapter, connects it, and verifies health.
    ///
    /// Startup failures are fatal by design: connection errors propagate
    /// as-is, and a connect that succeeds but fails the follow-up health
    /// probe is reported as a distinct verification error. The adapter is
    /// only attached once both steps pass.
    ///
    /// # Errors
    ///
    /// Returns adapter construction, connection, or health-verification
    /// errors. The service stays detached on any failure.
    #[instrument(skip(self))]
    pub async fn init(&self) -> Result<(), AppError> {
        let adapter = self.factory.create_adapter()?;
        self.init_with(adapter).await
    }

    /// `init` with a caller-supplied adapter. Useful for tests and for
    /// embedding the service with a pre-built adapter.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`init`](Self::init), minus construction.
    pub async fn init_with(&self, adapter: Arc<dyn DatabaseAdapter>) -> Result<(), AppError> {
        adapter.connect().await?;

        if !adapter.health_check().await {
            return Err(DatabaseError::HealthVerification(
                "health probe returned false immediately after connect".to_string(),
            )
            .into());
        }

        info!(driver = %adapter.kind(), "database service initialized");
        *self.adapter.write().await = Some(adapter);
        Ok(())
    }

    /// Best-effort teardown. A missing adapter is a silent no-op and a
    /// failing disconnect is logged but never propagated; shutdown must not
    /// be blocked by database errors.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        let adapter = self.adapter.write().await.take();
        match adapter {
            Some(adapter) => {
                if let Err(e) = adapter.disconnect().await {
                    error!(error = %e, "database disconnect failed during shutdown");
                } else {
                    info!("database service shut down");
                }
            }
            None => debug!("shutdown called with no attached adapter"),
        }
    }

    /// Returns the attached adapter for advanced callers, or `None` before
    /// `init` / after `shutdown`.
    pub async fn adapter(&self) -> Option<Arc<dyn DatabaseAdapter>> {
        self.adapter.read().await.clone()
    }

    /// Always-safe connectivity probe: `false` when detached or degraded.
    pub async fn health_check(&self) -> bool {
        match self.adapter().await {
            Some(adapter) => adapter.health_check().await,
            None => false,
        }
    }

    /// Identity of the connected database, or `None` when detached or the
    /// query fails.
    pub async fn database_info(&self) -> Option<DatabaseInfo> {
        match self.adapter().await {
            Some(adapter) => adapter.database_info().await,
            None => None,
        }
    }

    /// Connection state snapshot; `Disconnected` when no adapter is attached.
    pub async fn status(&self) -> DatabaseStatus {
        match self.adapter().await {
            Some(adapter) => adapter.status(),
            None => DatabaseStatus::Disconnected,
        }
    }

    /// Configured driver. Delegates to the factory, not the adapter: the
    /// selection is a configuration fact independent of connection state.
    pub fn driver_kind(&self) -> DriverKind {
        self.factory.driver_kind()
    }

    pub fn is_sqlx(&self) -> bool {
        self.factory.is_sqlx()
    }

    pub fn is_tokio_postgres(&self) -> bool {
        self.factory.is_tokio_postgres()
    }

    /// Aggregate health report for the health endpoint.
    pub async fn health_response(&self) -> HealthResponse {
        let database = if self.health_check().await {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };
        HealthResponse::new(database, self.status().await, self.driver_kind())
    }
}
