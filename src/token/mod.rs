//! Token-gated actions
//!
//! A [`TokenGate`] holds a current token, for example a request generation
//! or a snapshot of the state a UI action was built from. An action records
//! the token it saw when it was created with [`TokenGate::issue`]; when it
//! later runs through [`TokenGate::attempt`], a [`TokenPolicy`] compares that
//! issued token with the current one and decides whether the action may
//! proceed. A permitted action returns the next token, which replaces the
//! current one in the same critical section as the check.
//!
//! ```
//! use eventcell::token::{StructuralEquality, TokenGate};
//!
//! let gate = TokenGate::new(0u64);
//! let first = gate.issue().unwrap();
//! let duplicate = gate.issue().unwrap();
//!
//! assert!(gate.attempt(&first, &StructuralEquality, |current| current + 1).unwrap());
//! // The duplicate was issued against a generation that no longer exists
//! assert!(!gate.attempt(&duplicate, &StructuralEquality, |current| current + 1).unwrap());
//! assert_eq!(gate.current().unwrap(), 1);
//! ```

use crate::core::error_handling::ContextualError;
use crate::core::sync::handle_mutex_poison;
use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token gate lock poisoned: {message}")]
    LockPoisoned { message: String },
}

impl ContextualError for TokenError {
    fn is_user_actionable(&self) -> bool {
        false
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

pub type TokenResult<T> = Result<T, TokenError>;

/// Decides whether an action issued at one token may run at another
pub trait TokenPolicy<T>: Send + Sync {
    fn should_proceed(&self, issued: &T, current: &T) -> bool;
}

/// Permits every attempt
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysPermit;

impl<T> TokenPolicy<T> for AlwaysPermit {
    fn should_proceed(&self, _issued: &T, _current: &T) -> bool {
        true
    }
}

/// Permits an attempt only while the current token still equals the issued one
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralEquality;

impl<T: PartialEq> TokenPolicy<T> for StructuralEquality {
    fn should_proceed(&self, issued: &T, current: &T) -> bool {
        issued == current
    }
}

#[derive(Debug)]
pub struct TokenGate<T> {
    current: Mutex<T>,
}

impl<T: Clone> TokenGate<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: Mutex::new(initial),
        }
    }

    pub fn current(&self) -> TokenResult<T> {
        let guard = handle_mutex_poison(self.current.lock(), |message| {
            TokenError::LockPoisoned { message }
        })?;
        Ok(guard.clone())
    }

    /// Snapshot the token for an action being created now
    pub fn issue(&self) -> TokenResult<T> {
        self.current()
    }

    /// Run `action` if `policy` permits it, storing the token it returns
    ///
    /// Returns whether the action ran. The policy check and the token update
    /// happen under one lock, so of two actions issued at the same token only
    /// the first passes a [`StructuralEquality`] gate.
    pub fn attempt<P, F>(&self, issued: &T, policy: &P, action: F) -> TokenResult<bool>
    where
        P: TokenPolicy<T> + ?Sized,
        F: FnOnce(&T) -> T,
    {
        let mut guard = handle_mutex_poison(self.current.lock(), |message| {
            TokenError::LockPoisoned { message }
        })?;

        if !policy.should_proceed(issued, &*guard) {
            log::debug!("Rejected action issued against a stale token");
            return Ok(false);
        }

        let next = action(&*guard);
        *guard = next;
        Ok(true)
    }

    /// Bind an action to the token current at the time of this call
    pub fn gated<P>(self: &Arc<Self>, policy: P) -> TokenResult<GatedAction<T, P>>
    where
        P: TokenPolicy<T>,
    {
        Ok(GatedAction {
            gate: Arc::clone(self),
            issued: self.issue()?,
            policy,
        })
    }
}

/// An action created against a specific token
///
/// Typically built when a button or menu entry is rendered and run when it
/// is clicked; clicks on entries rendered before the token moved on are
/// rejected.
#[derive(Debug)]
pub struct GatedAction<T, P> {
    gate: Arc<TokenGate<T>>,
    issued: T,
    policy: P,
}

impl<T: Clone, P: TokenPolicy<T>> GatedAction<T, P> {
    pub fn issued(&self) -> &T {
        &self.issued
    }

    pub fn run<F>(&self, action: F) -> TokenResult<bool>
    where
        F: FnOnce(&T) -> T,
    {
        self.gate.attempt(&self.issued, &self.policy, action)
    }
}
