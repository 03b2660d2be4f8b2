//! Screen-level state types.

use std::{fmt, str::FromStr};

/// Screens the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Account creation
    SignUp,
    /// Credential entry
    Login,
    /// Signed-in landing screen
    Home,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SignUp => "sign up",
            Self::Login => "login",
            Self::Home => "home",
        };
        f.write_str(name)
    }
}

/// Input fields across the auth screens.
///
/// Each screen maps the keys it owns to fields of its form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Login name
    Username,
    /// Display name
    Name,
    /// Password
    Password,
    /// Password confirmation
    ConfirmPassword,
}

impl FieldKey {
    /// Short name used by text front-ends.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Name => "name",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "username" | "user" => Ok(Self::Username),
            "name" => Ok(Self::Name),
            "password" | "pass" => Ok(Self::Password),
            "confirm" => Ok(Self::ConfirmPassword),
            other => Err(format!("unknown field '{other}'")),
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
}

/// Transient message shown after a submission completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Text to display
    pub text: String,
}

impl Notice {
    /// Success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, text: text.into() }
    }

    /// Error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }
}
