//! Runtime errors.

use thiserror::Error;

/// Errors that stop [`crate::Runtime::run`].
///
/// Submission failures are not errors here; they reach the [`crate::App`] as
/// [`crate::AppEvent::Completed`] and become notices.
#[derive(Debug, Error)]
pub enum RuntimeError<E: std::error::Error + 'static> {
    /// The driver failed to read input or render.
    #[error("driver failed: {0}")]
    Driver(#[source] E),
}
