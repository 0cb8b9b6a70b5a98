//! Mutex guarded in-memory state cell

use crate::core::sync::handle_mutex_poison;
use crate::producer::{ProducerError, ProducerResult, StateCell};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// [`StateCell`] holding its value in process memory
///
/// The lock is held only for the read-modify-write itself; nothing awaits
/// while it is held. The value is gone once the cell is dropped, so callers
/// that need to survive recreation take a [`snapshot`](StateCell::snapshot)
/// and seed a new producer from it.
#[derive(Debug, Default)]
pub struct MemoryCell<A> {
    state: Mutex<A>,
}

impl<A> MemoryCell<A> {
    pub fn new(initial: A) -> Self {
        Self {
            state: Mutex::new(initial),
        }
    }

    fn lock(&self) -> ProducerResult<MutexGuard<'_, A>> {
        handle_mutex_poison(self.state.lock(), |message| ProducerError::LockPoisoned {
            message,
        })
    }
}

#[async_trait]
impl<A> StateCell<A> for MemoryCell<A>
where
    A: Clone + Send,
{
    async fn snapshot(&self) -> ProducerResult<A> {
        Ok(self.lock()?.clone())
    }

    async fn modify<T, F>(&self, update: F) -> ProducerResult<Option<T>>
    where
        F: FnOnce(&A) -> Option<(A, T)> + Send,
        T: Send,
    {
        let mut state = self.lock()?;
        Ok(update(&state).map(|(new_state, output)| {
            *state = new_state;
            output
        }))
    }
}
