//! In-memory auth backend.
//!
//! Every request is encoded to its JSON body and decoded again before it is
//! handled, so tests exercise the same wire format a real server would see.
//!
//! # Fault injection
//!
//! Queued faults are consumed in order, one per request, before the request
//! reaches the account registry. A faulted request has no effect on state.

use std::{
    collections::{HashMap, VecDeque},
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use formgate_app::AuthBackend;
use formgate_proto::{
    AuthReply, AuthRequest, Endpoint, Session, StatusCode, SubmitFailure, SubmitResult,
};
use tracing::debug;

/// Bad request; the body could not be decoded.
const BAD_REQUEST: StatusCode = StatusCode(400);

/// Backend behaviour knobs.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    /// Delay before each request is handled
    pub latency: Duration,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    name: String,
}

#[derive(Debug, Default)]
struct Registry {
    accounts: HashMap<String, Account>,
    faults: VecDeque<SubmitFailure>,
    received: Vec<Endpoint>,
    issued_sessions: u64,
}

/// Shared, cloneable in-memory backend.
///
/// Clones share the same registry, so a test can keep one handle for
/// assertions while the runtime moves others into submission tasks.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    config: BackendConfig,
    registry: Arc<Mutex<Registry>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new(config: BackendConfig) -> Self {
        Self { config, registry: Arc::default() }
    }

    /// Seed an existing account.
    #[must_use]
    pub fn with_account(self, username: &str, password: &str, name: &str) -> Self {
        self.registry().accounts.insert(
            username.to_string(),
            Account { password: password.to_string(), name: name.to_string() },
        );
        self
    }

    /// Make the next request fail with `code` without touching state.
    pub fn fail_next_with_status(&self, code: StatusCode) {
        self.registry().faults.push_back(SubmitFailure::Rejected(code));
    }

    /// Make the next request fail as if the connection dropped.
    pub fn fail_next_with_transport(&self, reason: &str) {
        self.registry().faults.push_back(SubmitFailure::Transport(reason.to_string()));
    }

    /// Whether an account exists for `username`.
    pub fn has_account(&self, username: &str) -> bool {
        self.registry().accounts.contains_key(username)
    }

    /// Display name registered for `username`.
    pub fn display_name(&self, username: &str) -> Option<String> {
        self.registry().accounts.get(username).map(|account| account.name.clone())
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.registry().accounts.len()
    }

    /// Endpoints hit so far, in order.
    pub fn received(&self) -> Vec<Endpoint> {
        self.registry().received.clone()
    }

    /// Handle a raw request body.
    pub fn handle(&self, endpoint: Endpoint, body: &[u8]) -> SubmitResult {
        let mut registry = self.registry();
        registry.received.push(endpoint);

        if let Some(fault) = registry.faults.pop_front() {
            debug!(%endpoint, %fault, "injected fault");
            return Err(fault);
        }

        let request = AuthRequest::from_body(endpoint, body).map_err(|error| {
            debug!(%error, "rejecting malformed body");
            SubmitFailure::Rejected(BAD_REQUEST)
        })?;

        match request {
            AuthRequest::Register(request) => {
                if registry.accounts.contains_key(&request.username) {
                    return Err(SubmitFailure::Rejected(StatusCode::CONFLICT));
                }
                registry.accounts.insert(
                    request.username,
                    Account { password: request.password, name: request.name },
                );
                Ok(AuthReply::Registered)
            },
            AuthRequest::Login(request) => {
                let accepted = registry
                    .accounts
                    .get(&request.username)
                    .is_some_and(|account| account.password == request.password);
                if !accepted {
                    return Err(SubmitFailure::Rejected(StatusCode::UNAUTHORIZED));
                }
                registry.issued_sessions += 1;
                let n = registry.issued_sessions;
                Ok(AuthReply::LoggedIn(Session {
                    access_token: format!("access-{n}"),
                    refresh_token: format!("refresh-{n}"),
                }))
            },
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AuthBackend for MemoryBackend {
    fn submit(&self, request: AuthRequest) -> impl Future<Output = SubmitResult> + Send {
        let backend = self.clone();
        async move {
            if !backend.config.latency.is_zero() {
                tokio::time::sleep(backend.config.latency).await;
            }
            let endpoint = request.endpoint();
            let body = request
                .to_body()
                .map_err(|error| SubmitFailure::Transport(error.to_string()))?;
            backend.handle(endpoint, &body)
        }
    }
}

#[cfg(test)]
mod tests {
    use formgate_proto::{LoginRequest, RegisterRequest};

    use super::*;

    fn register(username: &str) -> AuthRequest {
        AuthRequest::Register(RegisterRequest {
            username: username.into(),
            password: "Secret123".into(),
            name: "Someone".into(),
        })
    }

    fn body(request: &AuthRequest) -> Vec<u8> {
        request.to_body().unwrap()
    }

    #[test]
    fn duplicate_registration_conflicts() {
        let backend = MemoryBackend::default();
        let request = register("alice");

        assert_eq!(backend.handle(Endpoint::Register, &body(&request)), Ok(AuthReply::Registered));
        assert_eq!(
            backend.handle(Endpoint::Register, &body(&request)),
            Err(SubmitFailure::Rejected(StatusCode::CONFLICT))
        );
        assert_eq!(backend.account_count(), 1);
        assert_eq!(backend.display_name("alice").as_deref(), Some("Someone"));
    }

    #[test]
    fn login_checks_password() {
        let backend = MemoryBackend::default().with_account("bob", "pw", "Bob");
        let good = AuthRequest::Login(LoginRequest { username: "bob".into(), password: "pw".into() });
        let bad = AuthRequest::Login(LoginRequest { username: "bob".into(), password: "no".into() });

        assert!(matches!(
            backend.handle(Endpoint::Login, &body(&good)),
            Ok(AuthReply::LoggedIn(_))
        ));
        assert_eq!(
            backend.handle(Endpoint::Login, &body(&bad)),
            Err(SubmitFailure::Rejected(StatusCode::UNAUTHORIZED))
        );
    }

    #[test]
    fn malformed_body_is_bad_request() {
        let backend = MemoryBackend::default();
        assert_eq!(
            backend.handle(Endpoint::Register, b"not json"),
            Err(SubmitFailure::Rejected(StatusCode(400)))
        );
    }

    #[test]
    fn faults_are_consumed_once_and_leave_state_untouched() {
        let backend = MemoryBackend::default();
        backend.fail_next_with_transport("reset");
        let request = register("carol");

        assert_eq!(
            backend.handle(Endpoint::Register, &body(&request)),
            Err(SubmitFailure::Transport("reset".into()))
        );
        assert!(!backend.has_account("carol"));
        assert_eq!(backend.handle(Endpoint::Register, &body(&request)), Ok(AuthReply::Registered));
        assert_eq!(backend.received(), vec![Endpoint::Register, Endpoint::Register]);
    }
}
