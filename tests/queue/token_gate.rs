//! De-duplicating actions built from queue state
//!
//! A notification bar renders the head of the queue with a dismiss button.
//! The button is bound to the queue length at render time; a second click on
//! the same rendering must not dismiss the next notification too.

use eventcell::producer::MemoryQueue;
use eventcell::token::{AlwaysPermit, StructuralEquality, TokenGate};
use std::sync::Arc;

async fn render_token(queue: &MemoryQueue<String>) -> usize {
    queue.snapshot().await.unwrap().len()
}

#[tokio::test]
async fn test_double_click_dismisses_once() {
    let queue: MemoryQueue<String> = MemoryQueue::in_memory(3);
    for message in ["Saved", "Synced"] {
        queue.send(message.to_string()).await.unwrap();
    }

    let gate = Arc::new(TokenGate::new(render_token(&queue).await));
    let dismiss = gate.gated(StructuralEquality).unwrap();

    let mut dismissed = Vec::new();
    for _click in 0..2 {
        if dismiss.run(|&length| length - 1).unwrap() {
            dismissed.push(queue.consume().await.unwrap().unwrap());
        }
    }

    assert_eq!(dismissed, vec!["Saved".to_string()]);
    assert_eq!(gate.current().unwrap(), render_token(&queue).await);
}

#[tokio::test]
async fn test_always_permit_dismisses_on_every_click() {
    let queue: MemoryQueue<String> = MemoryQueue::in_memory(3);
    for message in ["Saved", "Synced"] {
        queue.send(message.to_string()).await.unwrap();
    }

    let gate = Arc::new(TokenGate::new(render_token(&queue).await));
    let dismiss = gate.gated(AlwaysPermit).unwrap();

    let mut dismissed = Vec::new();
    for _click in 0..2 {
        if dismiss.run(|&length| length - 1).unwrap() {
            dismissed.push(queue.consume().await.unwrap().unwrap());
        }
    }

    assert_eq!(dismissed, vec!["Saved".to_string(), "Synced".to_string()]);
}
