//! Tests for the JSON file store

#[cfg(test)]
mod tests {
    use crate::store::{FileStore, KeyValueStore, StoreError};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("store.json")).await.unwrap();

        assert_eq!(store.read("pending").await.unwrap(), None);
        assert!(!store.path().exists(), "nothing is written until first edit");
    }

    #[tokio::test]
    async fn test_open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.json");

        let store = FileStore::open(&path).await.unwrap();
        store
            .edit(|entries| {
                entries.insert("k".to_string(), "v".to_string());
                Ok(())
            })
            .await
            .unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_contents_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = FileStore::open(&path).await.unwrap();
            store
                .edit(|entries| {
                    entries.insert("pending".to_string(), "x,y,z".to_string());
                    Ok(())
                })
                .await
                .unwrap();
        }

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.read("pending").await.unwrap(),
            Some("x,y,z".to_string())
        );
        assert!(
            !dir.path().join("store.json.tmp").exists(),
            "temp file should have been renamed away"
        );
    }

    #[tokio::test]
    async fn test_failed_edit_is_not_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::open(&path).await.unwrap();

        let result: Result<(), _> = store
            .edit(|entries| {
                entries.insert("pending".to_string(), "lost".to_string());
                Err(StoreError::LockPoisoned {
                    message: "simulated".to_string(),
                })
            })
            .await;

        assert!(result.is_err());
        assert_eq!(store.read("pending").await.unwrap(), None);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_write_failure_keeps_stored_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::open(&path).await.unwrap();

        store
            .edit(|entries| {
                entries.insert("pending".to_string(), "kept".to_string());
                Ok(())
            })
            .await
            .unwrap();

        // A directory where the temp file should go makes the write fail
        std::fs::create_dir(dir.path().join("store.json.tmp")).unwrap();

        let result = store
            .edit(|entries| {
                entries.insert("pending".to_string(), "dropped".to_string());
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(store.read("pending").await.unwrap(), Some("kept".to_string()));
    }

    #[tokio::test]
    async fn test_stores_sharing_a_path_see_each_others_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let sender = FileStore::open(&path).await.unwrap();
        let watcher = FileStore::open(&path).await.unwrap();

        sender
            .edit(|entries| {
                entries.insert("pending".to_string(), "from-cli".to_string());
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(
            watcher.read("pending").await.unwrap(),
            Some("from-cli".to_string())
        );

        watcher
            .edit(|entries| {
                let value = entries.entry("pending".to_string()).or_default();
                value.push_str(",from-watch");
                Ok(())
            })
            .await
            .unwrap();

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.read("pending").await.unwrap(),
            Some("from-cli,from-watch".to_string())
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_edits_through_separate_stores_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut handles = Vec::new();
        for writer in 0..4 {
            let path = path.clone();
            handles.push(tokio::spawn(async move {
                let store = FileStore::open(&path).await.unwrap();
                for i in 0..10 {
                    store
                        .edit(|entries| {
                            entries.insert(format!("{}-{}", writer, i), "sent".to_string());
                            Ok(())
                        })
                        .await
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let store = FileStore::open(&path).await.unwrap();
        for writer in 0..4 {
            for i in 0..10 {
                assert_eq!(
                    store.read(&format!("{}-{}", writer, i)).await.unwrap(),
                    Some("sent".to_string()),
                    "edit {}-{} was overwritten",
                    writer,
                    i
                );
            }
        }
    }

    #[tokio::test]
    async fn test_open_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FileStore::open(&path).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
