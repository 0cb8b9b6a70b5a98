//! Pending messages across restarts

use crate::common::{open_file_queue, seq};
use eventcell::producer::DEFAULT_KEY;
use eventcell::store::SequenceCodec;
use tempfile::TempDir;

#[tokio::test]
async fn test_overflow_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    {
        let queue = open_file_queue(&path, DEFAULT_KEY, 3, SequenceCodec::default()).await;
        for message in ["A", "B", "C", "D"] {
            queue.send(message.to_string()).await.unwrap();
        }
    }

    let queue = open_file_queue(&path, DEFAULT_KEY, 3, SequenceCodec::default()).await;
    assert_eq!(queue.snapshot().await.unwrap(), seq(&["B", "C", "D"]));
    assert_eq!(queue.consume().await.unwrap(), Some("B".to_string()));

    let queue = open_file_queue(&path, DEFAULT_KEY, 3, SequenceCodec::default()).await;
    assert_eq!(queue.snapshot().await.unwrap(), seq(&["C", "D"]));
}

#[tokio::test]
async fn test_joined_format_is_readable_as_stored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    {
        let queue = open_file_queue(&path, DEFAULT_KEY, 3, SequenceCodec::Separated(',')).await;
        for message in ["x", "y", "z"] {
            queue.send(message.to_string()).await.unwrap();
        }
    }

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored[DEFAULT_KEY], "x,y,z");

    let queue = open_file_queue(&path, DEFAULT_KEY, 3, SequenceCodec::Separated(',')).await;
    assert_eq!(queue.snapshot().await.unwrap(), seq(&["x", "y", "z"]));
}

#[tokio::test]
async fn test_keys_are_independent_queues() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    {
        let toasts = open_file_queue(&path, "toasts", 3, SequenceCodec::default()).await;
        toasts.send("saved".to_string()).await.unwrap();
    }
    {
        let alerts = open_file_queue(&path, "alerts", 3, SequenceCodec::default()).await;
        alerts.send("offline".to_string()).await.unwrap();
    }

    let toasts = open_file_queue(&path, "toasts", 3, SequenceCodec::default()).await;
    let alerts = open_file_queue(&path, "alerts", 3, SequenceCodec::default()).await;
    assert_eq!(toasts.snapshot().await.unwrap(), seq(&["saved"]));
    assert_eq!(alerts.snapshot().await.unwrap(), seq(&["offline"]));
}

#[tokio::test]
async fn test_restore_after_restart_respects_capacity() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let queue = open_file_queue(&path, DEFAULT_KEY, 2, SequenceCodec::default()).await;
    queue
        .restore(["one", "two", "three"].map(String::from))
        .await
        .unwrap();
    drop(queue);

    let queue = open_file_queue(&path, DEFAULT_KEY, 2, SequenceCodec::default()).await;
    assert_eq!(queue.snapshot().await.unwrap(), seq(&["two", "three"]));
}

#[tokio::test]
async fn test_two_processes_sending_to_one_file_keep_both_messages() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let sender = open_file_queue(&path, DEFAULT_KEY, 3, SequenceCodec::default()).await;
    let watcher = open_file_queue(&path, DEFAULT_KEY, 3, SequenceCodec::default()).await;

    sender.send("from-cli".to_string()).await.unwrap();
    watcher.send("from-watch".to_string()).await.unwrap();
    assert_eq!(
        watcher.consume().await.unwrap(),
        Some("from-cli".to_string())
    );

    let reopened = open_file_queue(&path, DEFAULT_KEY, 3, SequenceCodec::default()).await;
    assert_eq!(reopened.snapshot().await.unwrap(), seq(&["from-watch"]));
}
