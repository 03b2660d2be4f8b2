//! Application layer for formgate
//!
//! Pure state machines and a generic runtime for the authentication screens.
//! The [`App`] owns every form and decides what happens on each input; the
//! [`Runtime`] executes the resulting actions, including the asynchronous
//! backend call, and feeds completions back into the same [`App`].
//!
//! # Components
//!
//! - [`App`]: Application state (screen, forms, busy flag, notice)
//! - [`SignUpForm`] / [`LoginForm`]: Field wiring for each screen
//! - [`AuthBackend`]: Trait for the network collaborator
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

mod action;
mod app;
mod backend;
mod driver;
mod error;
mod event;
mod forms;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use backend::AuthBackend;
pub use driver::Driver;
pub use error::RuntimeError;
pub use event::AppEvent;
pub use forms::{LoginForm, PasswordPolicy, SignUpForm, ValidationRules};
pub use runtime::Runtime;
pub use state::{FieldKey, Notice, NoticeLevel, Screen};
