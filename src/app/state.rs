//! Application state management.
//!
//! Shared state handed to all request handlers via Axum's State extractor.

use std::sync::Arc;

use super::service::DatabaseService;

/// Shared application state for the Axum web server.
///
/// All contained types are wrapped in `Arc` and implement `Send + Sync`,
/// making `AppState` safe to share across async tasks.
#[derive(Clone)]
pub struct AppState {
    /// The database lifecycle service and facade.
    pub database: Arc<DatabaseService>,
}

impl AppState {
    #[must_use]
    pub fn new(database: Arc<DatabaseService>) -> Self {
        Self { database }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{AdapterFactory, DatabaseConfig};

    fn state() -> AppState {
        let config = DatabaseConfig::new("postgres://localhost:5432/testdb");
        AppState::new(Arc::new(DatabaseService::new(AdapterFactory::new(config))))
    }

    #[test]
    fn test_app_state_is_clone() {
        let state = state();
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.database, &cloned.database));
    }
}
