//! Process-local key-value store

use crate::core::sync::handle_mutex_poison;
use crate::store::{Entries, KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory [`KeyValueStore`]
///
/// Edits run against a copy of the map which replaces the original only when
/// the closure succeeds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`
    pub fn with_entries(entries: Entries) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Entries>> {
        handle_mutex_poison(self.entries.lock(), |message| StoreError::LockPoisoned {
            message,
        })
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn edit<T, F>(&self, edit: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Entries) -> StoreResult<T> + Send,
        T: Send,
    {
        let mut entries = self.lock()?;
        let mut draft = entries.clone();
        let result = edit(&mut draft)?;
        *entries = draft;
        Ok(result)
    }
}
