//! Backend endpoints used by the auth screens.

use std::fmt;

/// REST endpoint for an [`crate::AuthRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Create an account
    Register,
    /// Exchange credentials for a session
    Login,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Register => "v1/auth/register",
            Self::Login => "v1/auth/login",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
