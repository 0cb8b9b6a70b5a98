//! JSON file backed key-value store

use crate::store::{Entries, KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// [`KeyValueStore`] persisted as a single JSON object on disk
///
/// Nothing is cached: every [`KeyValueStore::edit`] takes an exclusive
/// advisory lock on a sibling `.lock` file, re-reads the object, applies the
/// edit and writes the result to a sibling `.tmp` file that is renamed over
/// the original. Several stores, in this process or in others, can share one
/// path without losing each other's writes, and a crash mid-write leaves the
/// previous contents in place.
///
/// Reads do not take the lock; the rename makes every write visible at once.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
    writer: Mutex<()>,
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut sibling = path.as_os_str().to_owned();
    sibling.push(suffix);
    PathBuf::from(sibling)
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed
    ///
    /// A missing file is an empty store; it is created on the first write.
    /// Existing contents are parsed once here so a corrupt file is reported
    /// up front.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let store = Self {
            lock_path: sibling(&path, ".lock"),
            path,
            writer: Mutex::new(()),
        };
        let entries = store.load().await?;

        log::debug!(
            "Opened file store {} with {} key(s)",
            store.path.display(),
            entries.len()
        );

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoreResult<Entries> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Entries::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    /// Block until no other writer holds the lock file
    ///
    /// The lock is released when the returned handle is dropped.
    async fn lock_writers(&self) -> StoreResult<std::fs::File> {
        let lock_path = self.lock_path.clone();
        let locked = tokio::task::spawn_blocking(move || -> std::io::Result<std::fs::File> {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .read(true)
                .write(true)
                .truncate(false)
                .open(&lock_path)?;
            fs2::FileExt::lock_exclusive(&file)?;
            Ok(file)
        })
        .await
        .map_err(|e| StoreError::io(&self.lock_path, std::io::Error::other(e)))?;

        locked.map_err(|e| StoreError::io(&self.lock_path, e))
    }

    async fn persist(&self, entries: &Entries) -> StoreResult<()> {
        let contents = serde_json::to_string_pretty(entries)?;
        let tmp_path = sibling(&self.path, ".tmp");

        tokio::fs::write(&tmp_path, contents)
            .await
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        log::trace!("Persisted {} key(s) to {}", entries.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn edit<T, F>(&self, edit: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Entries) -> StoreResult<T> + Send,
        T: Send,
    {
        let _writer = self.writer.lock().await;
        let _lock = self.lock_writers().await?;

        let current = self.load().await?;
        let mut draft = current.clone();
        let result = edit(&mut draft)?;

        if draft != current {
            self.persist(&draft).await?;
        }

        Ok(result)
    }
}
