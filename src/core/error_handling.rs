//! Generic error handling utilities
//!
//! Errors from the producer, the store and the application shell all
//! implement [`ContextualError`], so the binary can decide whether to show a
//! specific message or a generic context line.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`; otherwise it should return `None`.
pub trait ContextualError: std::error::Error {
    /// True if the error carries a message the user can act on directly
    /// (bad configuration values, invalid arguments).
    fn is_user_actionable(&self) -> bool;

    /// The user-facing message for actionable errors
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors show their own message; system errors show the
/// operation context. Full detail is always available at debug level.
///
/// # Examples
/// ```rust,no_run
/// # use eventcell::core::error_handling::log_error_with_context;
/// # use eventcell::producer::ProducerError;
/// let err = ProducerError::invalid_capacity(-1);
/// log_error_with_context(&err, "Building notification queue");
/// // Logs: "FATAL: capacity must be non-negative, got -1"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
