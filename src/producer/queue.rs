//! Bounded FIFO policy with drop-oldest overflow

use crate::producer::{EventPolicy, ExtractResult, ProducerError};
use std::collections::VecDeque;
use std::marker::PhantomData;

/// FIFO queue of at most `capacity` pending elements
///
/// Sending into a full queue silently discards the oldest pending elements;
/// they are never delivered. A capacity of zero discards everything.
///
/// # Example
///
/// ```
/// use eventcell::producer::{BoundedQueue, EventPolicy, ExtractResult};
/// use std::collections::VecDeque;
///
/// let queue = BoundedQueue::new(2);
/// let state = queue.fold("a", &VecDeque::new());
/// let state = queue.fold("b", &state);
/// let state = queue.fold("c", &state);
/// assert_eq!(state, VecDeque::from(vec!["b", "c"]));
///
/// match queue.extract(&state) {
///     ExtractResult::Produced { element, new_state } => {
///         assert_eq!(element, "b");
///         assert_eq!(new_state, VecDeque::from(vec!["c"]));
///     }
///     ExtractResult::Empty => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedQueue<T> {
    capacity: usize,
    _element: PhantomData<fn() -> T>,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            _element: PhantomData,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> TryFrom<i64> for BoundedQueue<T> {
    type Error = ProducerError;

    /// Build from a signed value such as a configuration entry
    ///
    /// Negative capacities are rejected here rather than on first use.
    fn try_from(capacity: i64) -> Result<Self, Self::Error> {
        usize::try_from(capacity)
            .map(Self::new)
            .map_err(|_| ProducerError::invalid_capacity(capacity))
    }
}

impl<T> EventPolicy for BoundedQueue<T>
where
    T: Clone + Send + Sync + 'static,
{
    type State = VecDeque<T>;
    type Input = T;
    type Output = T;

    fn fold(&self, element: T, state: &VecDeque<T>) -> VecDeque<T> {
        let mut next = VecDeque::with_capacity(state.len() + 1);
        next.extend(state.iter().cloned());
        next.push_back(element);

        let overflow = next.len().saturating_sub(self.capacity);
        if overflow > 0 {
            next.drain(..overflow);
            log::debug!(
                "Dropped {} oldest pending element(s), capacity is {}",
                overflow,
                self.capacity
            );
        }
        next
    }

    fn extract(&self, state: &VecDeque<T>) -> ExtractResult<VecDeque<T>, T> {
        match state.front() {
            None => ExtractResult::Empty,
            Some(head) => ExtractResult::Produced {
                element: head.clone(),
                new_state: state.iter().skip(1).cloned().collect(),
            },
        }
    }
}
