use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DatabaseError;

/// Connection-lifecycle state of a database adapter.
///
/// Transitions: `Disconnected` → `Connecting` (on connect) → `Connected`
/// (successful probe) or `Error` (failure); `Connected` → `Disconnected`
/// (on disconnect); any state → `Error` on unexpected failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl DatabaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseStatus::Disconnected => "disconnected",
            DatabaseStatus::Connecting => "connecting",
            DatabaseStatus::Connected => "connected",
            DatabaseStatus::Error => "error",
        }
    }
}

impl fmt::Display for DatabaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported database driver backends.
///
/// Exactly one backend is selected per process, at factory construction
/// time. Parsing is strict; the lenient warn-and-default path lives in
/// the factory, which is the single decision point for driver selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DriverKind {
    Sqlx,
    TokioPostgres,
}

impl DriverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverKind::Sqlx => "sqlx",
            DriverKind::TokioPostgres => "tokio-postgres",
        }
    }
}

impl Default for DriverKind {
    fn default() -> Self {
        DriverKind::Sqlx
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverKind {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlx" => Ok(DriverKind::Sqlx),
            "tokio-postgres" => Ok(DriverKind::TokioPostgres),
            other => Err(DatabaseError::UnsupportedDriver(other.to_string())),
        }
    }
}

/// Identity snapshot of the connected database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseInfo {
    pub database_name: String,
    pub current_user: String,
    pub server_version: String,
}

/// Health status of a single dependency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Aggregate health report returned by the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub database: HealthStatus,
    pub database_status: DatabaseStatus,
    pub driver: DriverKind,
}

impl HealthResponse {
    #[must_use]
    pub fn new(database: HealthStatus, database_status: DatabaseStatus, driver: DriverKind) -> Self {
        Self {
            status: database,
            database,
            database_status,
            driver,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
