//! App actions
//!
//! Actions produced by the App state machine for the runtime to execute.

use formgate_proto::AuthRequest;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Send a validated request to the backend.
    ///
    /// The runtime performs the call off the UI context and reports back with
    /// [`crate::AppEvent::Completed`].
    Submit {
        /// Request built from the current field values.
        request: AuthRequest,
    },
}
