//! Synchronization utilities for robust mutex handling
//!
//! State cells and stores guard their values with `std::sync::Mutex`. A panic
//! inside a fold or extract closure poisons that mutex; these helpers turn the
//! poison into a typed error instead of propagating the panic to every later
//! caller.

use std::sync::{LockResult, MutexGuard};

/// Handle poisoned mutex cases with consistent error handling
///
/// Converts a poison error into an application error using the provided
/// constructor, so every module reports poisoning the same way.
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use eventcell::core::sync::handle_mutex_poison;
/// use eventcell::store::StoreError;
///
/// let mutex = Mutex::new(42);
/// let guard = handle_mutex_poison(mutex.lock(), |message| StoreError::LockPoisoned { message })
///     .unwrap();
/// assert_eq!(*guard, 42);
/// ```
pub fn handle_mutex_poison<'a, T, E>(
    result: LockResult<MutexGuard<'a, T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (mutex poisoned). A panic occurred while holding the lock. PoisonError: {:?}",
            poison_err
        ))
    })
}
