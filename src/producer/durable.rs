//! State cell persisted in a key-value store

use crate::producer::{ProducerResult, StateCell};
use crate::store::{Entries, KeyValueStore, SequenceCodec, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;

/// Key used when none is configured
pub const DEFAULT_KEY: &str = "pending_messages";

/// [`StateCell`] over a sequence of strings stored under one key
///
/// Every snapshot and every modification is a single store transaction, so
/// the state survives the cell, the producer and the process. Nothing else
/// may write to the same key.
pub struct DurableCell<S> {
    store: Arc<S>,
    key: String,
    codec: SequenceCodec,
}

impl<S: KeyValueStore> DurableCell<S> {
    pub fn new(store: Arc<S>, key: impl Into<String>, codec: SequenceCodec) -> Self {
        Self {
            store,
            key: key.into(),
            codec,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn codec(&self) -> SequenceCodec {
        self.codec
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn decode(&self, raw: Option<&String>) -> StoreResult<VecDeque<String>> {
        match raw {
            None => Ok(VecDeque::new()),
            Some(raw) => self.codec.decode(raw).map_err(|source| StoreError::Corrupt {
                key: self.key.clone(),
                source,
            }),
        }
    }

    fn apply<T>(
        &self,
        entries: &mut Entries,
        update: impl FnOnce(&VecDeque<String>) -> Option<(VecDeque<String>, T)>,
    ) -> StoreResult<Option<T>> {
        let current = self.decode(entries.get(&self.key))?;
        Ok(update(&current).map(|(new_state, output)| {
            entries.insert(self.key.clone(), self.codec.encode(&new_state));
            output
        }))
    }
}

#[async_trait]
impl<S: KeyValueStore> StateCell<VecDeque<String>> for DurableCell<S> {
    async fn snapshot(&self) -> ProducerResult<VecDeque<String>> {
        let raw = self.store.read(&self.key).await?;
        Ok(self.decode(raw.as_ref())?)
    }

    async fn modify<T, F>(&self, update: F) -> ProducerResult<Option<T>>
    where
        F: FnOnce(&VecDeque<String>) -> Option<(VecDeque<String>, T)> + Send,
        T: Send,
    {
        let output = self.store.edit(|entries| self.apply(entries, update)).await?;
        log::trace!("Durable cell '{}' transaction finished", self.key);
        Ok(output)
    }
}
