//! Deterministic test doubles for formgate.
//!
//! An in-memory implementation of [`formgate_app::AuthBackend`] and a
//! scripted [`formgate_app::Driver`], so the generic runtime can be exercised
//! end to end without a network or a terminal.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod memory_backend;
pub mod scripted_driver;

pub use memory_backend::{BackendConfig, MemoryBackend};
pub use scripted_driver::{Frame, FrameLog, ScriptError, ScriptedDriver};
