//! State-to-Event Producer
//!
//! Turns a piece of shared state into a sequential stream of discrete events,
//! each delivered to the consumer exactly once.
//!
//! # Overview
//!
//! - **Policy** ([`EventPolicy`]): a `fold` that merges a sent element into
//!   the state and an `extract` that takes the next element back out.
//!   [`BoundedQueue`] is the FIFO with drop-oldest overflow used for
//!   notifications.
//! - **Cell** ([`StateCell`]): where the state lives. [`MemoryCell`] keeps it
//!   behind a mutex; [`DurableCell`] keeps it in a
//!   [`KeyValueStore`](crate::store::KeyValueStore) so it outlives the process.
//! - **Signal** ([`RetriggerSignal`]): a coalescing wake-up posted after every
//!   send and every successful extraction.
//! - **Producer** ([`EventProducer`]): runs fold and extract as atomic cell
//!   transactions and drives the consumer loop from the signal.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  ┌────────────┐
//! │ Producer A │  │ Producer B │
//! └─────┬──────┘  └─────┬──────┘
//!       │ send          │ send
//!       ▼               ▼
//! ┌──────────────────────────────────┐
//! │ EventProducer                     │
//! │   fold ──► StateCell ◄── extract  │──► post ──► RetriggerSignal
//! └──────────────────────────────────┘                  │ wait
//!                  ▲ consume                            │
//!                  └──────────── handle_elements ◄──────┘
//!                                      │
//!                                      ▼ handler(element)
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use eventcell::producer::{BoundedQueue, EventProducer, MemoryCell};
//! use std::collections::VecDeque;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let notifications = Arc::new(EventProducer::new(
//!     BoundedQueue::new(3),
//!     MemoryCell::new(VecDeque::new()),
//! ));
//!
//! let consumer = Arc::clone(&notifications);
//! tokio::spawn(async move {
//!     consumer
//!         .handle_elements(|message: String| async move {
//!             println!("{}", message);
//!         })
//!         .await
//! });
//!
//! notifications.send("Saved".to_string()).await?;
//! # Ok(())
//! # }
//! ```

mod cell;
mod durable;
mod error;
mod event_producer;
mod memory;
mod policy;
mod queue;
mod signal;

pub use cell::StateCell;
pub use durable::{DurableCell, DEFAULT_KEY};
pub use error::{ProducerError, ProducerResult};
pub use event_producer::EventProducer;
pub use memory::MemoryCell;
pub use policy::{EventPolicy, ExtractResult, FnPolicy};
pub use queue::BoundedQueue;
pub use signal::RetriggerSignal;

use crate::store::KeyValueStore;
use std::collections::VecDeque;

/// Bounded notification queue kept in memory
pub type MemoryQueue<T> = EventProducer<BoundedQueue<T>, MemoryCell<VecDeque<T>>>;

/// Bounded notification queue persisted in a store
pub type DurableQueue<S> = EventProducer<BoundedQueue<String>, DurableCell<S>>;

impl<T> MemoryQueue<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Empty in-memory queue holding at most `capacity` elements
    pub fn in_memory(capacity: usize) -> Self {
        EventProducer::new(BoundedQueue::new(capacity), MemoryCell::default())
    }
}

impl<S: KeyValueStore> DurableQueue<S> {
    /// Queue over `cell`; elements already stored under its key are pending
    pub fn durable(capacity: usize, cell: DurableCell<S>) -> Self {
        EventProducer::new(BoundedQueue::new(capacity), cell)
    }
}

#[cfg(test)]
mod tests;
