//! Request and reply bodies.
//!
//! `Debug` output redacts secrets so payloads can be logged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Endpoint, ProtoError, Result};

const REDACTED: &str = "<redacted>";

/// Body of a registration request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Login name, unique per account
    pub username: String,
    /// Plain-text password (sent over TLS)
    pub password: String,
    /// Display name
    pub name: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("name", &self.name)
            .finish()
    }
}

/// Body of a login request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub username: String,
    /// Plain-text password (sent over TLS)
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Tokens issued on successful login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Short-lived bearer token
    pub access_token: String,
    /// Token used to obtain a new access token
    pub refresh_token: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &REDACTED)
            .field("refresh_token", &REDACTED)
            .finish()
    }
}

/// A request a screen submits once its validation gate passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    /// Sign-up screen submission
    Register(RegisterRequest),
    /// Login screen submission
    Login(LoginRequest),
}

impl AuthRequest {
    /// Endpoint the request is posted to.
    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::Register(_) => Endpoint::Register,
            Self::Login(_) => Endpoint::Login,
        }
    }

    /// Username carried by the request.
    pub fn username(&self) -> &str {
        match self {
            Self::Register(request) => &request.username,
            Self::Login(request) => &request.username,
        }
    }

    /// Serialize the request body as JSON.
    pub fn to_body(&self) -> Result<Vec<u8>> {
        let endpoint = self.endpoint();
        let encoded = match self {
            Self::Register(request) => serde_json::to_vec(request),
            Self::Login(request) => serde_json::to_vec(request),
        };
        encoded.map_err(|source| ProtoError::Encode { endpoint, source })
    }

    /// Parse a JSON body received on `endpoint`.
    pub fn from_body(endpoint: Endpoint, body: &[u8]) -> Result<Self> {
        let decoded = match endpoint {
            Endpoint::Register => serde_json::from_slice(body).map(Self::Register),
            Endpoint::Login => serde_json::from_slice(body).map(Self::Login),
        };
        decoded.map_err(|source| ProtoError::Decode { endpoint, source })
    }
}

/// Successful reply to an [`AuthRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthReply {
    /// Account created
    Registered,
    /// Credentials accepted
    LoggedIn(Session),
}
