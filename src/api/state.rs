//! Application state for the time tracker API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::calculation::DEFAULT_HOURS_PER_DAY;
use crate::storage::Store;

/// Shared application state.
///
/// Holds the one database handle of the process. Each request locks it
/// for the duration of its storage calls.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<Store>>,
    hours_per_day: u32,
}

impl AppState {
    /// Creates a new application state around an opened store.
    pub fn new(store: Store, hours_per_day: u32) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            hours_per_day,
        }
    }

    /// State over a fresh in-memory database with the default daily target.
    pub fn in_memory() -> crate::error::TrackerResult<Self> {
        Ok(Self::new(Store::open_in_memory()?, DEFAULT_HOURS_PER_DAY))
    }

    /// Locks the store for this request.
    ///
    /// A panic in another handler cannot leave the connection half
    /// written (every write is its own transaction), so a poisoned lock
    /// is recovered.
    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Target hours per business day used for reports.
    pub fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }
}
