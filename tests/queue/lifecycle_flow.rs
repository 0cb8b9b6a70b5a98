//! Lifecycle-gated delivery with producers running alongside

use crate::common::{open_file_queue, seq};
use eventcell::lifecycle::{repeat_while_active, LifecycleController};
use eventcell::producer::{MemoryQueue, DEFAULT_KEY};
use eventcell::store::SequenceCodec;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::timeout;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_every_message_delivered_once_across_pauses() {
    let queue: Arc<MemoryQueue<String>> = Arc::new(MemoryQueue::in_memory(1000));
    let controller = LifecycleController::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let driver = {
        let queue = Arc::clone(&queue);
        tokio::spawn(repeat_while_active(controller.subscribe(), move || {
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            async move {
                let _ = queue
                    .handle_elements(|message| {
                        let tx = tx.clone();
                        async move {
                            let _ = tx.send(message);
                        }
                    })
                    .await;
            }
        }))
    };

    controller.activate();
    let producer = {
        let queue = Arc::clone(&queue);
        tokio::spawn(async move {
            for i in 0..200 {
                queue.send(format!("message-{}", i)).await.unwrap();
                if i % 25 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        })
    };

    for _ in 0..5 {
        tokio::time::sleep(Duration::from_millis(2)).await;
        controller.deactivate();
        tokio::time::sleep(Duration::from_millis(2)).await;
        controller.activate();
    }
    producer.await.unwrap();

    let mut received = Vec::new();
    while received.len() < 200 {
        let message = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("all messages should arrive")
            .expect("channel open");
        received.push(message);
    }

    let expected: Vec<String> = (0..200).map(|i| format!("message-{}", i)).collect();
    assert_eq!(received, expected, "delivered once each, in send order");

    drop(controller);
    timeout(Duration::from_secs(1), driver).await.unwrap().unwrap();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_durable_consumer_resumes_after_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    {
        let queue = open_file_queue(&path, DEFAULT_KEY, 5, SequenceCodec::default()).await;
        for message in ["first", "second", "third"] {
            queue.send(message.to_string()).await.unwrap();
        }
        // Consumer sees only the first before the process goes away
        assert_eq!(queue.consume().await.unwrap(), Some("first".to_string()));
    }

    let queue = Arc::new(open_file_queue(&path, DEFAULT_KEY, 5, SequenceCodec::default()).await);
    let controller = LifecycleController::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let driver = {
        let queue = Arc::clone(&queue);
        tokio::spawn(repeat_while_active(controller.subscribe(), move || {
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            async move {
                let _ = queue
                    .handle_elements(|message| {
                        let tx = tx.clone();
                        async move {
                            let _ = tx.send(message);
                        }
                    })
                    .await;
            }
        }))
    };

    controller.activate();
    for expected in ["second", "third"] {
        let message = timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(message, expected);
    }

    drop(controller);
    timeout(Duration::from_secs(1), driver).await.unwrap().unwrap();
    assert_eq!(queue.snapshot().await.unwrap(), seq(&[]));
}
