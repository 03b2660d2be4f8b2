//! Submission outcomes and their categorization.

use std::fmt;

use thiserror::Error;

use crate::AuthReply;

/// Outcome of submitting an [`crate::AuthRequest`].
pub type SubmitResult = std::result::Result<AuthReply, SubmitFailure>;

/// HTTP status code returned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Credentials rejected
    pub const UNAUTHORIZED: Self = Self(401);
    /// Identity already exists
    pub const CONFLICT: Self = Self(409);
    /// Backend failure
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse category a UI branches its messaging on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Duplicate identity
    Conflict,
    /// Bad credentials
    Unauthorized,
    /// Anything else
    Other,
}

/// Why a submission failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitFailure {
    /// The backend answered with a non-success status.
    #[error("backend rejected request with status {0}")]
    Rejected(StatusCode),

    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl SubmitFailure {
    /// Category for user-facing messaging.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Rejected(StatusCode::CONFLICT) => FailureKind::Conflict,
            Self::Rejected(StatusCode::UNAUTHORIZED) => FailureKind::Unauthorized,
            Self::Rejected(_) | Self::Transport(_) => FailureKind::Other,
        }
    }
}
