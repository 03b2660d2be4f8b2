//! Network collaborator abstraction.

use std::future::Future;

use formgate_proto::{AuthRequest, SubmitResult};

/// Performs authentication requests against a backend.
///
/// Called by [`crate::Runtime`] only after a screen's validation gate passed.
/// The returned future runs on a spawned task, so it must not touch UI state;
/// its result is handed back to the runtime over a channel.
pub trait AuthBackend: Send + Sync {
    /// Submit `request` and report the categorized outcome.
    fn submit(&self, request: AuthRequest) -> impl Future<Output = SubmitResult> + Send;
}
