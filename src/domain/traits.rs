//! Domain traits defining contracts for database backends.

use std::any::Any;

use async_trait::async_trait;

use super::error::AppError;
use super::types::{DatabaseInfo, DatabaseStatus, DriverKind};

/// Capability contract satisfied by every database adapter.
///
/// An adapter owns exactly one driver client (and its connection pool) and
/// translates generic lifecycle and query operations into driver-specific
/// calls. Lifecycle methods (`connect`/`disconnect`) assume a single owner
/// driving them sequentially; probe and query methods are safe to call
/// concurrently since the underlying pool multiplexes physical connections.
#[async_trait]
pub trait DatabaseAdapter: Send + Sync + std::fmt::Debug {
    /// Returns the driver backend this adapter wraps.
    fn kind(&self) -> DriverKind;

    /// Builds the underlying client/pool and verifies reachability with a
    /// `SELECT 1` round trip. Fails fast; no retry.
    async fn connect(&self) -> Result<(), AppError>;

    /// Closes the pool and releases the client reference. Calling this on an
    /// already-disconnected adapter is a logged no-op.
    async fn disconnect(&self) -> Result<(), AppError>;

    /// Probes connectivity. Never errors: all failures (including a missing
    /// pool) are reported as `false` with a status update.
    async fn health_check(&self) -> bool;

    /// Returns the connected database's name, user, and server version, or
    /// `None` when detached or the query fails (logged, not propagated).
    async fn database_info(&self) -> Option<DatabaseInfo>;

    /// Executes a literal SQL string through the driver's raw execution
    /// primitive and returns the reported row count.
    ///
    /// No parameterization or escaping happens at this layer; callers own
    /// query safety and must never pass untrusted input.
    async fn execute_raw(&self, sql: &str) -> Result<u64, AppError>;

    /// Current connection state, synchronously, no I/O.
    fn status(&self) -> DatabaseStatus;

    /// Downcast hook for callers that need the driver-native pool handle.
    fn as_any(&self) -> &dyn Any;
}
