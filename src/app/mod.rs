//! Application layer containing the lifecycle service and shared state.

pub mod service;
pub mod state;

pub use service::DatabaseService;
pub use state::AppState;
