//! Fold/extract policies
//!
//! A policy decides what the state looks like and how elements enter and
//! leave it. The producer only supplies the atomicity around the two calls.

use std::marker::PhantomData;

/// Outcome of asking a policy for the next deliverable element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractResult<A, Y> {
    /// An element is ready; `new_state` replaces the current state
    Produced { element: Y, new_state: A },
    /// Nothing to deliver; the state stays as it is
    Empty,
}

/// The pair of pure functions driving an [`EventProducer`](crate::producer::EventProducer)
///
/// Both functions run while the state cell is locked, so they must not block
/// and should be cheap.
pub trait EventPolicy: Send + Sync {
    type State: Send + Sync + 'static;
    type Input: Send;
    type Output: Send;

    /// Merge `element` into `state`, producing the state to commit
    fn fold(&self, element: Self::Input, state: &Self::State) -> Self::State;

    /// Take the next element out of `state`, if there is one
    fn extract(&self, state: &Self::State) -> ExtractResult<Self::State, Self::Output>;
}

/// [`EventPolicy`] assembled from two closures
///
/// ```
/// use eventcell::producer::{ExtractResult, FnPolicy};
///
/// // Collapse any number of "refresh" requests into a single pending one
/// let policy = FnPolicy::new(
///     |_request: (), _pending: &bool| true,
///     |pending: &bool| {
///         if *pending {
///             ExtractResult::Produced { element: (), new_state: false }
///         } else {
///             ExtractResult::Empty
///         }
///     },
/// );
/// # let _ = policy;
/// ```
pub struct FnPolicy<A, X, Y, F, E> {
    fold: F,
    extract: E,
    _types: PhantomData<fn(X, A) -> (A, Y)>,
}

impl<A, X, Y, F, E> FnPolicy<A, X, Y, F, E>
where
    F: Fn(X, &A) -> A,
    E: Fn(&A) -> ExtractResult<A, Y>,
{
    pub fn new(fold: F, extract: E) -> Self {
        Self {
            fold,
            extract,
            _types: PhantomData,
        }
    }
}

impl<A, X, Y, F, E> EventPolicy for FnPolicy<A, X, Y, F, E>
where
    A: Send + Sync + 'static,
    X: Send,
    Y: Send,
    F: Fn(X, &A) -> A + Send + Sync,
    E: Fn(&A) -> ExtractResult<A, Y> + Send + Sync,
{
    type State = A;
    type Input = X;
    type Output = Y;

    fn fold(&self, element: X, state: &A) -> A {
        (self.fold)(element, state)
    }

    fn extract(&self, state: &A) -> ExtractResult<A, Y> {
        (self.extract)(state)
    }
}
