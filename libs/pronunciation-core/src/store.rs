//! Progress store contract and an in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::progress::ProgressRecord;

/// Persistence for progress records, keyed uniquely by (user, lesson).
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Fetch the record for a (user, lesson) pair.
    async fn find(&self, user_id: Uuid, lesson_id: Uuid) -> Result<Option<ProgressRecord>>;

    /// Insert a new record.
    ///
    /// Returns [`StoreError::Conflict`] if a record for the key already exists.
    async fn create(&self, record: &ProgressRecord) -> Result<ProgressRecord>;

    /// Write a record over the existing one and return what was stored.
    ///
    /// Must be atomic with respect to other writers and must not lose
    /// progress committed concurrently: the stored value is
    /// `current.merge(record)` (see [`ProgressRecord::merge`]).
    async fn update(&self, record: &ProgressRecord) -> Result<ProgressRecord>;
}

/// Simple in-memory store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryProgressStore {
    records: Arc<Mutex<HashMap<(Uuid, Uuid), ProgressRecord>>>,
}

impl InMemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn find(&self, user_id: Uuid, lesson_id: Uuid) -> Result<Option<ProgressRecord>> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(&(user_id, lesson_id)).cloned())
    }

    async fn create(&self, record: &ProgressRecord) -> Result<ProgressRecord> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        let key = (record.user_id, record.lesson_id);
        if guard.contains_key(&key) {
            return Err(StoreError::Conflict);
        }
        guard.insert(key, record.clone());
        Ok(record.clone())
    }

    async fn update(&self, record: &ProgressRecord) -> Result<ProgressRecord> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        let current = guard
            .get_mut(&(record.user_id, record.lesson_id))
            .ok_or(StoreError::NotFound)?;
        *current = current.merge(record);
        Ok(current.clone())
    }
}
