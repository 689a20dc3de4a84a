//! Mock implementations for testing.
//!
//! `MockAdapter` is an in-memory stand-in for a driver-backed adapter that
//! can be configured to simulate connection, teardown, and query failures.

use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;

use crate::domain::{
    AppError, DatabaseAdapter, DatabaseError, DatabaseInfo, DatabaseStatus, DriverKind,
};
use crate::infra::database::status::StatusCell;

/// Configuration for mock behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// If true, `connect` fails.
    pub fail_connect: bool,
    /// If true, `disconnect` fails.
    pub fail_disconnect: bool,
    /// If true, `execute_raw` and `database_info` fail.
    pub fail_queries: bool,
    /// Custom error message for failures.
    pub error_message: Option<String>,
    /// Driver kind the mock reports.
    pub kind: Option<DriverKind>,
}

impl MockConfig {
    /// Creates a config that always succeeds.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a config whose `connect` always fails.
    #[must_use]
    pub fn failing_connect(message: impl Into<String>) -> Self {
        Self {
            fail_connect: true,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Creates a config whose `disconnect` always fails.
    #[must_use]
    pub fn failing_disconnect(message: impl Into<String>) -> Self {
        Self {
            fail_disconnect: true,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Creates a config whose query paths always fail.
    #[must_use]
    pub fn failing_queries(message: impl Into<String>) -> Self {
        Self {
            fail_queries: true,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: DriverKind) -> Self {
        self.kind = Some(kind);
        self
    }

    fn message(&self, fallback: &str) -> String {
        self.error_message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Mock database adapter for testing.
///
/// Tracks per-operation call counts and honors a settable health flag so
/// tests can drive the connected/degraded transitions without a database.
#[derive(Debug)]
pub struct MockAdapter {
    config: MockConfig,
    status: StatusCell,
    is_healthy: AtomicBool,
    attached: AtomicBool,
    connect_calls: AtomicU64,
    disconnect_calls: AtomicU64,
    query_calls: AtomicU64,
}

impl MockAdapter {
    /// Creates a new mock with default (success) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    /// Creates a new mock with the given configuration.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            status: StatusCell::default(),
            is_healthy: AtomicBool::new(true),
            attached: AtomicBool::new(false),
            connect_calls: AtomicU64::new(0),
            disconnect_calls: AtomicU64::new(0),
            query_calls: AtomicU64::new(0),
        }
    }

    /// Sets the health flag consulted by `health_check`.
    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    pub fn connect_calls(&self) -> u64 {
        self.connect_calls.load(Ordering::Relaxed)
    }

    pub fn disconnect_calls(&self) -> u64 {
        self.disconnect_calls.load(Ordering::Relaxed)
    }

    pub fn query_calls(&self) -> u64 {
        self.query_calls.load(Ordering::Relaxed)
    }

    fn attached(&self) -> bool {
        self.attached.load(Ordering::Relaxed)
    }
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseAdapter for MockAdapter {
    fn kind(&self) -> DriverKind {
        self.config.kind.unwrap_or_default()
    }

    async fn connect(&self) -> Result<(), AppError> {
        self.connect_calls.fetch_add(1, Ordering::Relaxed);
        self.status.set(DatabaseStatus::Connecting);

        if self.config.fail_connect {
            self.status.set(DatabaseStatus::Error);
            return Err(
                DatabaseError::Connection(self.config.message("Mock connect failure")).into(),
            );
        }

        self.attached.store(true, Ordering::Relaxed);
        self.status.set(DatabaseStatus::Connected);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), AppError> {
        self.disconnect_calls.fetch_add(1, Ordering::Relaxed);

        if self.config.fail_disconnect {
            return Err(
                DatabaseError::Connection(self.config.message("Mock disconnect failure")).into(),
            );
        }

        self.attached.store(false, Ordering::Relaxed);
        self.status.set(DatabaseStatus::Disconnected);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        if !self.attached() || !self.is_healthy.load(Ordering::Relaxed) {
            self.status.set(DatabaseStatus::Error);
            return false;
        }
        self.status.set(DatabaseStatus::Connected);
        true
    }

    async fn database_info(&self) -> Option<DatabaseInfo> {
        self.query_calls.fetch_add(1, Ordering::Relaxed);

        if !self.attached() || self.config.fail_queries {
            return None;
        }

        Some(DatabaseInfo {
            database_name: "mockdb".to_string(),
            current_user: "mock".to_string(),
            server_version: "PostgreSQL 16.0 (mock)".to_string(),
        })
    }

    async fn execute_raw(&self, _sql: &str) -> Result<u64, AppError> {
        self.query_calls.fetch_add(1, Ordering::Relaxed);

        if !self.attached() {
            return Err(DatabaseError::NotInitialized("mock not connected".to_string()).into());
        }
        if self.config.fail_queries {
            return Err(DatabaseError::Query(self.config.message("Mock query failure")).into());
        }
        Ok(1)
    }

    fn status(&self) -> DatabaseStatus {
        self.status.get()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_lifecycle() {
        let mock = MockAdapter::new();
        assert_eq!(mock.status(), DatabaseStatus::Disconnected);

        mock.connect().await.unwrap();
        assert_eq!(mock.status(), DatabaseStatus::Connected);
        assert!(mock.health_check().await);

        mock.disconnect().await.unwrap();
        assert_eq!(mock.status(), DatabaseStatus::Disconnected);
        assert!(!mock.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_connect_failure() {
        let mock = MockAdapter::with_config(MockConfig::failing_connect("refused"));
        let err = mock.connect().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Database(DatabaseError::Connection(_))
        ));
        assert_eq!(mock.status(), DatabaseStatus::Error);
    }

    #[tokio::test]
    async fn test_mock_query_failure() {
        let mock = MockAdapter::with_config(MockConfig::failing_queries("boom"));
        mock.connect().await.unwrap();

        assert!(mock.execute_raw("SELECT 1").await.is_err());
        assert!(mock.database_info().await.is_none());
        assert_eq!(mock.query_calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_reports_configured_kind() {
        let mock =
            MockAdapter::with_config(MockConfig::success().with_kind(DriverKind::TokioPostgres));
        assert_eq!(mock.kind(), DriverKind::TokioPostgres);

        let mock = MockAdapter::new();
        assert_eq!(mock.kind(), DriverKind::Sqlx);
    }
}
