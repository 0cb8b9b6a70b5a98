//! State cell abstraction

use crate::producer::ProducerResult;
use async_trait::async_trait;

/// Holder of the producer's state
///
/// All mutation goes through [`modify`](Self::modify), which must be atomic
/// with respect to every other `modify` on the same cell: the value handed to
/// the closure is the value the commit replaces.
#[async_trait]
pub trait StateCell<A: Send>: Send + Sync {
    /// Copy of the current state
    async fn snapshot(&self) -> ProducerResult<A>;

    /// Read, transform and commit in one transaction
    ///
    /// `update` returns `None` to leave the state unchanged, or
    /// `Some((new_state, output))` to commit `new_state` and hand `output`
    /// back to the caller.
    async fn modify<T, F>(&self, update: F) -> ProducerResult<Option<T>>
    where
        F: FnOnce(&A) -> Option<(A, T)> + Send,
        T: Send;
}
