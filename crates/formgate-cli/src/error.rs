//! Front-end errors.

use formgate_app::RuntimeError;
use formgate_core::FormError;
use thiserror::Error;

/// Errors raised by [`crate::TerminalDriver`].
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Reading input or writing output failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The screen could not be formatted.
    #[error("failed to format screen: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Errors that end the `formgate` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Forms could not be built from the configured rules.
    #[error("invalid form setup: {0}")]
    Form(#[from] FormError),

    /// The runtime stopped on a driver failure.
    #[error(transparent)]
    Runtime(#[from] RuntimeError<TerminalError>),
}
