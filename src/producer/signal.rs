//! Coalescing "look again" notification

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// Single-slot wake-up flag
///
/// [`post`](Self::post) sets the slot; posting while it is already set does
/// nothing, so any number of posts between two waits collapse into one
/// wake-up. [`wait`](Self::wait) returns once the slot is set and clears it.
/// The signal carries no data: it only means the state may have changed.
#[derive(Debug)]
pub struct RetriggerSignal {
    pending: AtomicBool,
    notify: Notify,
}

impl RetriggerSignal {
    /// A signal that starts out set, so the first waiter inspects the state
    /// immediately
    pub fn new() -> Self {
        Self::with_pending(true)
    }

    pub fn with_pending(pending: bool) -> Self {
        Self {
            pending: AtomicBool::new(pending),
            notify: Notify::new(),
        }
    }

    /// Set the slot and wake waiters
    ///
    /// Returns `false` when the slot was already set and the post coalesced.
    pub fn post(&self) -> bool {
        if self.pending.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.notify.notify_waiters();
        true
    }

    pub fn is_set(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Clear the slot without waiting; returns whether it was set
    pub fn try_take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Wait until the slot is set, then clear it
    pub async fn wait(&self) {
        loop {
            // Register interest before checking the flag so a post landing in
            // between is not missed.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.try_take() {
                return;
            }
            notified.await;
        }
    }
}

impl Default for RetriggerSignal {
    fn default() -> Self {
        Self::new()
    }
}
