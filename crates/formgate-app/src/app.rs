//! Application state machine.
//!
//! # Submission
//!
//! ```text
//! ┌──────┐  Submit, gate passes   ┌──────┐
//! │ Idle │───────────────────────>│ Busy │
//! └──────┘                        └──────┘
//!    ▲  │ Submit, gate fails          │
//!    │  └──> Render (errors shown)    │ Completed(result)
//!    └────────────────────────────────┘
//!            busy cleared on every outcome, then branch on result
//! ```
//!
//! The App never performs I/O. It emits [`AppAction::Submit`] and waits for
//! the runtime to deliver [`AppEvent::Completed`] back on the same context
//! that handles user input.

use formgate_core::FormError;
use formgate_proto::{AuthReply, AuthRequest, FailureKind, SubmitFailure, SubmitResult};
use tracing::{debug, info, warn};

use crate::{
    AppAction, AppEvent,
    forms::{LoginForm, SignUpForm, ValidationRules},
    state::{FieldKey, Notice, Screen},
};

/// Submission awaiting its completion event.
#[derive(Debug, Clone)]
struct InFlight {
    origin: Screen,
    username: String,
}

/// Application state for the auth flow.
#[derive(Debug)]
pub struct App {
    screen: Screen,
    sign_up: SignUpForm,
    login: LoginForm,
    in_flight: Option<InFlight>,
    notice: Option<Notice>,
    signed_in: Option<String>,
}

impl App {
    /// Create the app on the sign-up screen.
    pub fn new(rules: &ValidationRules) -> Result<Self, FormError> {
        Ok(Self {
            screen: Screen::SignUp,
            sign_up: SignUpForm::new(rules)?,
            login: LoginForm::new()?,
            in_flight: None,
            notice: None,
            signed_in: None,
        })
    }

    /// Active screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Whether a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Last notice, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Username of the signed-in account.
    pub fn signed_in(&self) -> Option<&str> {
        self.signed_in.as_deref()
    }

    /// Sign-up screen state.
    pub fn sign_up(&self) -> &SignUpForm {
        &self.sign_up
    }

    /// Login screen state.
    pub fn login(&self) -> &LoginForm {
        &self.login
    }

    /// Fields of the active screen, with current text.
    pub fn fields(&self) -> Vec<(FieldKey, &str)> {
        let keys: &[FieldKey] = match self.screen {
            Screen::SignUp => &[
                FieldKey::Username,
                FieldKey::Name,
                FieldKey::Password,
                FieldKey::ConfirmPassword,
            ],
            Screen::Login => &[FieldKey::Username, FieldKey::Password],
            Screen::Home => &[],
        };
        keys.iter()
            .map(|&key| {
                let value = match self.screen {
                    Screen::SignUp => self.sign_up.value(key),
                    Screen::Login => self.login.value(key),
                    Screen::Home => "",
                };
                (key, value)
            })
            .collect()
    }

    /// Error messages on the active screen.
    pub fn errors(&self) -> Vec<(FieldKey, String)> {
        match self.screen {
            Screen::SignUp => self.sign_up.errors(),
            Screen::Login => self.login.errors(),
            Screen::Home => Vec::new(),
        }
    }

    /// Process an event and return actions for the runtime.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Input { field, value } => self.input(field, value),
            AppEvent::Submit => self.submit(),
            AppEvent::Navigate(screen) => self.navigate(screen),
            AppEvent::Completed(result) => self.complete(result),
            AppEvent::Quit => vec![AppAction::Quit],
        }
    }

    fn input(&mut self, field: FieldKey, value: String) -> Vec<AppAction> {
        let applied = match self.screen {
            Screen::SignUp => self.sign_up.set(field, value),
            Screen::Login => self.login.set(field, value),
            Screen::Home => None,
        };
        if applied.is_none() {
            debug!(screen = %self.screen, %field, "input for field not on screen ignored");
            return Vec::new();
        }
        vec![AppAction::Render]
    }

    fn submit(&mut self) -> Vec<AppAction> {
        if self.is_busy() {
            debug!("submission already in flight");
            return Vec::new();
        }

        let request = match self.screen {
            Screen::SignUp => self.sign_up.gate().map(AuthRequest::Register),
            Screen::Login => self.login.gate().map(AuthRequest::Login),
            Screen::Home => return Vec::new(),
        };
        let Some(request) = request else {
            debug!(screen = %self.screen, "validation gate rejected submission");
            return vec![AppAction::Render];
        };

        self.in_flight =
            Some(InFlight { origin: self.screen, username: request.username().to_string() });
        self.notice = None;
        vec![AppAction::Submit { request }, AppAction::Render]
    }

    fn navigate(&mut self, screen: Screen) -> Vec<AppAction> {
        if screen == Screen::Home && self.signed_in.is_none() {
            debug!("home requires a signed-in account");
            return Vec::new();
        }
        self.screen = screen;
        self.notice = None;
        vec![AppAction::Render]
    }

    fn complete(&mut self, result: SubmitResult) -> Vec<AppAction> {
        let Some(InFlight { origin, username }) = self.in_flight.take() else {
            warn!("completion received with no submission in flight");
            return Vec::new();
        };

        match result {
            Ok(AuthReply::Registered) => {
                info!(%username, "registration succeeded");
                self.notice = Some(Notice::success("Registration successful"));
                self.login.set(FieldKey::Username, username);
                self.screen = Screen::Login;
            },
            Ok(AuthReply::LoggedIn(_session)) => {
                info!(%username, "login succeeded");
                self.notice = Some(Notice::success(format!("Welcome back, {username}")));
                self.signed_in = Some(username);
                self.screen = Screen::Home;
            },
            Err(failure) => {
                info!(%username, screen = %origin, %failure, "submission failed");
                self.notice = Some(Notice::error(failure_message(&failure)));
            },
        }
        vec![AppAction::Render]
    }
}

fn failure_message(failure: &SubmitFailure) -> String {
    match (failure.kind(), failure) {
        (FailureKind::Conflict, _) => "Username already exists".to_string(),
        (FailureKind::Unauthorized, _) => "Invalid username or password".to_string(),
        (FailureKind::Other, SubmitFailure::Rejected(code)) => {
            format!("Something went wrong ({code})")
        },
        (FailureKind::Other, SubmitFailure::Transport(reason)) => {
            format!("Network error: {reason}")
        },
    }
}
