//! Key-value storage backing durable state cells
//!
//! A [`KeyValueStore`] holds string values under string keys and exposes a
//! single transactional primitive, [`KeyValueStore::edit`]: the closure sees
//! the whole map, and either every change it makes is persisted or none is.
//! Durable cells build their read-modify-write on top of it.
//!
//! Two stores are provided:
//!
//! - [`MemoryStore`]: process-local, for tests and for callers that snapshot
//!   state themselves
//! - [`FileStore`]: a JSON object on disk, replaced atomically on each edit
//!
//! Sequences of strings are packed into one value by a [`SequenceCodec`].

mod codec;
mod error;
mod file;
mod memory;

pub use codec::{DecodeError, SequenceCodec, DEFAULT_SEPARATOR};
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use std::collections::BTreeMap;

/// The full contents of a store
pub type Entries = BTreeMap<String, String>;

/// Transactional string key-value store
///
/// Implementations must serialise concurrent `edit` calls and must leave the
/// stored contents untouched when the closure returns an error or the write
/// fails.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a single value without taking part in a transaction
    async fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Run `edit` against the store contents as one transaction
    async fn edit<T, F>(&self, edit: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Entries) -> StoreResult<T> + Send,
        T: Send;
}

#[cfg(test)]
mod tests;
