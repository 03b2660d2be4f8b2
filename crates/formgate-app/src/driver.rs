//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific input and rendering, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{App, AppEvent, AuthBackend};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`crate::Runtime`] handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal front-end and in tests.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Backend handle moved into submission tasks.
    type Backend: AuthBackend + Clone + 'static;

    /// Poll for input and return events to process.
    ///
    /// Returns an empty vector if no input is ready. The runtime races this
    /// future against submission completions, so it must be cancel-safe.
    fn poll_event(
        &mut self,
        app: &App,
    ) -> impl Future<Output = Result<Vec<AppEvent>, Self::Error>> + Send;

    /// Backend used for submissions.
    fn backend(&self) -> Self::Backend;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release resources before the runtime returns.
    fn stop(&mut self);
}
