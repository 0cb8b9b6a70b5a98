//! Common test utilities and helpers

use eventcell::producer::{DurableCell, DurableQueue};
use eventcell::store::{FileStore, SequenceCodec};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

pub fn seq(items: &[&str]) -> VecDeque<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Durable queue over a fresh `FileStore` at `path`, as a restarted process would build it
pub async fn open_file_queue(
    path: &Path,
    key: &str,
    capacity: usize,
    codec: SequenceCodec,
) -> DurableQueue<FileStore> {
    let store = FileStore::open(path).await.expect("store should open");
    DurableQueue::durable(capacity, DurableCell::new(Arc::new(store), key, codec))
}
