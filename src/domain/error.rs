//! Application error types with proper error chaining.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Query execution failed: {0}")]
    Query(String),
    #[error("Adapter not initialized: {0}")]
    NotInitialized(String),
    #[error("Database connected but failed health verification: {0}")]
    HealthVerification(String),
    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),
    #[error("Pool exhausted: {0}")]
    PoolExhausted(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted("Pool timed out".to_string()),
            sqlx::Error::PoolClosed => {
                DatabaseError::NotInitialized("Pool already closed".to_string())
            }
            sqlx::Error::Io(e) => DatabaseError::Connection(e.to_string()),
            sqlx::Error::Database(db_err) => DatabaseError::Query(db_err.message().to_string()),
            _ => DatabaseError::Query(err.to_string()),
        }
    }
}

impl From<tokio_postgres::Error> for DatabaseError {
    fn from(err: tokio_postgres::Error) -> Self {
        // tokio-postgres reports connection-level failures without a SQLSTATE.
        if err.code().is_none() {
            DatabaseError::Connection(err.to_string())
        } else {
            DatabaseError::Query(err.to_string())
        }
    }
}

impl<E: std::fmt::Display> From<bb8::RunError<E>> for DatabaseError {
    fn from(err: bb8::RunError<E>) -> Self {
        match err {
            bb8::RunError::User(e) => DatabaseError::Connection(e.to_string()),
            bb8::RunError::TimedOut => {
                DatabaseError::PoolExhausted("Pool checkout timed out".to_string())
            }
        }
    }
}

mod http {
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde_json::json;

    use super::{AppError, DatabaseError};

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let (status, code) = match &self {
                AppError::Database(DatabaseError::Connection(_))
                | AppError::Database(DatabaseError::NotInitialized(_))
                | AppError::Database(DatabaseError::HealthVerification(_))
                | AppError::Database(DatabaseError::PoolExhausted(_)) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "database_unavailable")
                }
                AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
                AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
                AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            };

            let body = Json(json!({
                "error": {
                    "code": code,
                    "message": self.to_string(),
                }
            }));

            (status, body).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_error_conversions() {
        let pool_timeout = DatabaseError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(pool_timeout, DatabaseError::PoolExhausted(_)));

        let closed = DatabaseError::from(sqlx::Error::PoolClosed);
        assert!(matches!(closed, DatabaseError::NotInitialized(_)));

        // Unknown errors fall back to the query variant
        let generic = DatabaseError::from(sqlx::Error::WorkerCrashed);
        assert!(matches!(generic, DatabaseError::Query(_)));
    }

    #[test]
    fn test_bb8_error_conversions() {
        let timed_out: bb8::RunError<std::io::Error> = bb8::RunError::TimedOut;
        assert!(matches!(
            DatabaseError::from(timed_out),
            DatabaseError::PoolExhausted(_)
        ));

        let user = bb8::RunError::User(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        assert!(matches!(
            DatabaseError::from(user),
            DatabaseError::Connection(_)
        ));
    }

    #[test]
    fn test_database_error_display() {
        let err = DatabaseError::Connection("timeout".to_string());
        assert_eq!(err.to_string(), "Connection failed: timeout");

        let err = DatabaseError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "Query execution failed: syntax error");

        let err = DatabaseError::NotInitialized("no pool".to_string());
        assert_eq!(err.to_string(), "Adapter not initialized: no pool");

        let err = DatabaseError::UnsupportedDriver("mysql".to_string());
        assert_eq!(err.to_string(), "Unsupported database driver: mysql");

        let err = DatabaseError::HealthVerification("probe returned false".to_string());
        assert_eq!(
            err.to_string(),
            "Database connected but failed health verification: probe returned false"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("DATABASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: DATABASE_URL"
        );

        let err = ConfigError::InvalidValue {
            key: "DATABASE_MAX_CONNECTIONS".to_string(),
            message: "not a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'DATABASE_MAX_CONNECTIONS': not a number"
        );
    }

    #[test]
    fn test_app_error_from_database_error() {
        let db_err = DatabaseError::Connection("refused".to_string());
        let app_err: AppError = db_err.into();
        assert!(matches!(
            app_err,
            AppError::Database(DatabaseError::Connection(_))
        ));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let cfg_err = ConfigError::MissingEnvVar("KEY".to_string());
        let app_err: AppError = cfg_err.into();
        assert!(matches!(
            app_err,
            AppError::Config(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn test_http_status_mapping() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let unavailable: AppError = DatabaseError::Connection("refused".to_string()).into();
        assert_eq!(
            unavailable.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        let unavailable: AppError = DatabaseError::NotInitialized("no pool".to_string()).into();
        assert_eq!(
            unavailable.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        let internal: AppError = DatabaseError::Query("syntax".to_string()).into();
        assert_eq!(
            internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let internal: AppError = ConfigError::MissingEnvVar("DATABASE_URL".to_string()).into();
        assert_eq!(
            internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
