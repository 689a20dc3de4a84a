//! pgswitch
//!
//! Postgres access layer with a runtime-selectable driver backend behind a
//! single adapter contract.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   API Layer                  │
//! │      Health and database info endpoints      │
//! ├─────────────────────────────────────────────┤
//! │               Application Layer              │
//! │   Lifecycle service owning "the" adapter     │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │   Adapter trait, status machine, errors      │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │  sqlx / tokio-postgres adapters, factory     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Key Features
//!
//! - **One contract, two drivers**: `DatabaseAdapter` is implemented by a
//!   sqlx-backed and a tokio-postgres-backed adapter; `DATABASE_DRIVER`
//!   picks one per process, defaulting to sqlx on anything unrecognized
//! - **Single lifecycle owner**: `DatabaseService` connects and
//!   health-verifies the adapter at startup and tears it down best-effort
//!   at shutdown
//! - **Always-safe facade**: steady-state probe and info failures surface
//!   as `false`/`None`, never as crashes in request-serving code
//! - **Testability**: a configurable mock adapter drives the lifecycle and
//!   failure paths without a database
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pgswitch::api::create_router;
//! use pgswitch::app::{AppState, DatabaseService};
//! use pgswitch::infra::{AdapterFactory, DatabaseConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DatabaseConfig::from_env()?;
//!     let service = Arc::new(DatabaseService::new(AdapterFactory::new(config)));
//!     service.init().await?;
//!
//!     let router = create_router(Arc::new(AppState::new(service.clone())));
//!     axum::serve(listener, router).await?;
//!
//!     service.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infra;

// Test utilities are available in tests
#[cfg(test)]
pub mod test_utils;
