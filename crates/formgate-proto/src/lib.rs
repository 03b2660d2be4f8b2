//! Payloads exchanged with the formgate auth backend.
//!
//! Requests are JSON bodies posted to versioned REST endpoints. Replies are
//! either a typed success value or a [`SubmitFailure`] categorized by HTTP
//! status code, so callers can branch on duplicates and bad credentials
//! without parsing response bodies.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod endpoint;
pub mod errors;
pub mod payloads;
pub mod status;

pub use endpoint::Endpoint;
pub use errors::{ProtoError, Result};
pub use payloads::{AuthReply, AuthRequest, LoginRequest, RegisterRequest, Session};
pub use status::{FailureKind, StatusCode, SubmitFailure, SubmitResult};
