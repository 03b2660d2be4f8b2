//! App events
//!
//! Inputs to the App state machine: user interaction from the driver and
//! completions posted back by the runtime.

use formgate_proto::SubmitResult;

use crate::state::{FieldKey, Screen};

/// Events consumed by [`crate::App::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The user edited a field on the active screen.
    Input {
        /// Field that changed.
        field: FieldKey,
        /// Full new text of the field.
        value: String,
    },

    /// The user pressed the submit button.
    Submit,

    /// The user switched screens.
    Navigate(Screen),

    /// The in-flight backend call finished.
    Completed(SubmitResult),

    /// The user asked to quit.
    Quit,
}
