//! Field validation engine for formgate
//!
//! Pure, synchronous state machine logic for form fields, completely
//! decoupled from rendering and I/O. Every operation completes before it
//! returns, so the engine can be driven from a single UI context and tested
//! without a runtime.
//!
//! # Architecture
//!
//! Fields live in an arena owned by a [`Form`] and are addressed by
//! [`FieldId`]. Dependency edges are stored as arena indices, so cascades
//! walk an explicit adjacency structure instead of shared references.
//!
//! Every mutation returns a [`Propagation`] report describing which fields
//! were revalidated and their resulting status. A UI layer applies the
//! report (or polls revision counters) to keep error messages live.
//!
//! # Components
//!
//! - [`validator`]: Stateless validation rules and their outcomes
//! - [`form`]: Field arena, dependency edges, and cascade propagation
//! - [`watcher`]: All-or-nothing validation gate over a set of fields
//! - [`error`]: Caller errors (unknown or foreign field identifiers)

#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod form;
pub mod id;
pub mod validator;
pub mod watcher;

pub use error::FormError;
pub use field::{Field, FieldStatus};
pub use form::{FieldChange, Form, Propagation};
pub use id::{FieldId, FormId};
pub use validator::{CharClass, FieldLookup, LengthBound, Outcome, ValidationContext, Validator};
pub use watcher::Watcher;
