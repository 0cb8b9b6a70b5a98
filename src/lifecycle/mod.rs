//! Lifecycle-gated consumption
//!
//! A [`LifecycleController`] tracks whether the owner of a consumer is
//! active. [`repeat_while_active`] starts a block (typically
//! [`EventProducer::handle_elements`](crate::producer::EventProducer::handle_elements))
//! every time the state becomes active and cancels it when the state leaves
//! active. Cancellation drops the block's future; whatever element it was
//! handling at that moment has already left the state and is not replayed.

use std::future::Future;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Inactive,
    Active,
}

/// Owner of the active/inactive state
///
/// Dropping the controller ends every [`repeat_while_active`] loop subscribed
/// to it.
#[derive(Debug)]
pub struct LifecycleController {
    state_tx: watch::Sender<LifecycleState>,
}

impl LifecycleController {
    /// Create a controller in the inactive state
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(LifecycleState::Inactive);
        Self { state_tx }
    }

    pub fn activate(&self) {
        self.transition(LifecycleState::Active);
    }

    pub fn deactivate(&self) {
        self.transition(LifecycleState::Inactive);
    }

    pub fn state(&self) -> LifecycleState {
        *self.state_tx.borrow()
    }

    pub fn is_active(&self) -> bool {
        self.state() == LifecycleState::Active
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state_tx.subscribe()
    }

    fn transition(&self, next: LifecycleState) {
        let changed = self.state_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            log::debug!("Lifecycle is now {:?}", next);
        }
    }
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves to `true` once the state equals `wanted`, `false` if the
/// controller is gone
async fn wait_until(state: &mut watch::Receiver<LifecycleState>, wanted: LifecycleState) -> bool {
    // wait_for still matches the last value after the sender is gone
    if state.has_changed().is_err() {
        return false;
    }
    state.wait_for(|current| *current == wanted).await.is_ok()
}

/// Run `block` whenever the lifecycle is active
///
/// Each activation calls `block` once. Deactivation cancels the running
/// block; a block that finishes on its own is not restarted until the next
/// activation. Returns when the controller is dropped.
pub async fn repeat_while_active<F, Fut>(mut state: watch::Receiver<LifecycleState>, mut block: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        if !wait_until(&mut state, LifecycleState::Active).await {
            return;
        }

        log::trace!("Lifecycle active, starting block");
        let deactivated = {
            let run = block();
            tokio::pin!(run);

            tokio::select! {
                _ = &mut run => None,
                still_open = wait_until(&mut state, LifecycleState::Inactive) => Some(still_open),
            }
        };

        match deactivated {
            Some(true) => log::trace!("Lifecycle inactive, block cancelled"),
            Some(false) => return,
            None => {
                log::trace!("Block completed while active");
                if !wait_until(&mut state, LifecycleState::Inactive).await {
                    return;
                }
            }
        }
    }
}
