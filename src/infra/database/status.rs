//! Lock-free status cell shared by the adapter implementations.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::domain::DatabaseStatus;

const DISCONNECTED: u8 = 0;
const CONNECTING: u8 = 1;
const CONNECTED: u8 = 2;
const ERROR: u8 = 3;

/// Atomic holder for a [`DatabaseStatus`] snapshot.
///
/// Adapters expose `status()` synchronously while lifecycle and probe
/// methods update it from async contexts, so the state lives in an atomic
/// rather than behind a lock.
#[derive(Debug)]
pub(crate) struct StatusCell(AtomicU8);

impl StatusCell {
    pub(crate) fn new(status: DatabaseStatus) -> Self {
        Self(AtomicU8::new(encode(status)))
    }

    pub(crate) fn get(&self) -> DatabaseStatus {
        decode(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn set(&self, status: DatabaseStatus) {
        self.0.store(encode(status), Ordering::Release);
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new(DatabaseStatus::Disconnected)
    }
}

fn encode(status: DatabaseStatus) -> u8 {
    match status {
        DatabaseStatus::Disconnected => DISCONNECTED,
        DatabaseStatus::Connecting => CONNECTING,
        DatabaseStatus::Connected => CONNECTED,
        DatabaseStatus::Error => ERROR,
    }
}

fn decode(raw: u8) -> DatabaseStatus {
    match raw {
        CONNECTING => DatabaseStatus::Connecting,
        CONNECTED => DatabaseStatus::Connected,
        ERROR => DatabaseStatus::Error,
        _ => DatabaseStatus::Disconnected,
    }
}
