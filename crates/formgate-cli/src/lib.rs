//! Terminal front-end for formgate
//!
//! A thin shell over [`formgate_app::Driver`] that reads commands line by
//! line and prints the active screen after every change. All orchestration
//! logic lives in the generic [`formgate_app::Runtime`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod error;
pub mod terminal;
pub mod ui;

pub use commands::Command;
pub use error::{CliError, TerminalError};
pub use formgate_app::{App, AppAction, AppEvent, Driver, Runtime};
pub use terminal::TerminalDriver;
