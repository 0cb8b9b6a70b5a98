//! The state-to-event producer

use crate::producer::{EventPolicy, ExtractResult, ProducerResult, RetriggerSignal, StateCell};
use futures::stream::{self, Stream, StreamExt};
use std::future::Future;

/// Turns shared state into a stream of exactly-once events
///
/// Producers [`send`](Self::send) elements, which the policy folds into the
/// state held by the cell. A single logical consumer takes them back out with
/// [`consume`](Self::consume), [`stream`](Self::stream) or
/// [`handle_elements`](Self::handle_elements). Each fold and each extraction
/// runs as one transaction on the cell, so concurrent senders never lose
/// updates and an element is removed exactly once.
///
/// An element counts as delivered the moment it leaves the state. If the
/// consumer is cancelled while handling it, the element is gone; it is not
/// redelivered.
///
/// # Thread Safety
///
/// All methods take `&self`; share the producer with `Arc<EventProducer<..>>`.
///
/// # Example
///
/// ```rust
/// use eventcell::producer::{BoundedQueue, EventProducer, MemoryCell};
/// use std::collections::VecDeque;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let producer = EventProducer::new(BoundedQueue::new(3), MemoryCell::new(VecDeque::new()));
///
/// for message in ["A", "B", "C", "D"] {
///     producer.send(message.to_string()).await?;
/// }
///
/// assert_eq!(producer.consume().await?, Some("B".to_string()));
/// assert_eq!(producer.snapshot().await?, VecDeque::from(vec!["C".to_string(), "D".to_string()]));
/// # Ok(())
/// # }
/// ```
pub struct EventProducer<P, C>
where
    P: EventPolicy,
    C: StateCell<P::State>,
{
    policy: P,
    cell: C,
    signal: RetriggerSignal,
}

impl<P, C> EventProducer<P, C>
where
    P: EventPolicy,
    C: StateCell<P::State>,
{
    pub fn new(policy: P, cell: C) -> Self {
        Self {
            policy,
            cell,
            signal: RetriggerSignal::new(),
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn cell(&self) -> &C {
        &self.cell
    }

    pub fn signal(&self) -> &RetriggerSignal {
        &self.signal
    }

    /// Fold `element` into the state and wake the consumer
    pub async fn send(&self, element: P::Input) -> ProducerResult<()> {
        let policy = &self.policy;
        self.cell
            .modify(move |state| Some((policy.fold(element, state), ())))
            .await?;
        log::trace!("Element folded into state");

        self.signal.post();
        Ok(())
    }

    /// Send each element in order
    ///
    /// Used to seed a freshly built producer with elements saved from a
    /// previous instance.
    pub async fn restore<I>(&self, elements: I) -> ProducerResult<()>
    where
        I: IntoIterator<Item = P::Input>,
    {
        let mut restored = 0usize;
        for element in elements {
            self.send(element).await?;
            restored += 1;
        }
        log::debug!("Restored {} pending element(s)", restored);
        Ok(())
    }

    /// Take the next element out of the state, if any
    ///
    /// A successful extraction re-posts the retrigger signal so a waiting
    /// consumer keeps draining without another send.
    pub async fn consume(&self) -> ProducerResult<Option<P::Output>> {
        let policy = &self.policy;
        let element = self
            .cell
            .modify(|state| match policy.extract(state) {
                ExtractResult::Produced { element, new_state } => Some((new_state, element)),
                ExtractResult::Empty => None,
            })
            .await?;

        if element.is_some() {
            self.signal.post();
        }
        Ok(element)
    }

    /// Copy of the pending state, for saving before teardown
    pub async fn snapshot(&self) -> ProducerResult<P::State> {
        self.cell.snapshot().await
    }

    /// Endless stream of elements, driven by the retrigger signal
    ///
    /// The stream never ends on its own; drop it to stop consuming. Cell
    /// errors are yielded in place of an element and the stream keeps going,
    /// so the caller decides whether to stop.
    pub fn stream(&self) -> impl Stream<Item = ProducerResult<P::Output>> + '_ {
        stream::unfold(self, |producer| async move {
            loop {
                producer.signal.wait().await;
                match producer.consume().await {
                    Ok(Some(element)) => return Some((Ok(element), producer)),
                    Ok(None) => continue,
                    Err(e) => return Some((Err(e), producer)),
                }
            }
        })
    }

    /// Deliver every element to `handler`, one at a time, until an error
    ///
    /// The handler's future is awaited before the next element is taken.
    /// Dropping the returned future cancels delivery; an element whose
    /// handler was interrupted is lost.
    pub async fn handle_elements<H, Fut>(&self, mut handler: H) -> ProducerResult<()>
    where
        H: FnMut(P::Output) -> Fut,
        Fut: Future<Output = ()>,
    {
        let elements = self.stream();
        futures::pin_mut!(elements);

        while let Some(element) = elements.next().await {
            handler(element?).await;
        }
        Ok(())
    }
}
