//! Test utilities and mock implementations.
//!
//! Reusable mock adapter for unit tests that need lifecycle and failure
//! scenarios without a live database.

pub mod mocks;

pub use mocks::{MockAdapter, MockConfig};
