//! Per-field state.
//!
//! # Lifecycle
//!
//! ```text
//! ┌──────────┐  set_value / validate  ┌────────────────────┐
//! │ Pristine │───────────────────────>│ Valid | Invalid(m) │
//! └──────────┘                        └────────────────────┘
//!                                        │            ▲
//!                                        └────────────┘
//!                                  every later validation run
//! ```
//!
//! A field never returns to `Pristine`. The UI can therefore tell an
//! untouched field apart from one that was touched and found valid.

use crate::validator::Validator;

/// Validation status of a field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldStatus {
    /// Never validated
    #[default]
    Pristine,
    /// Last validation run passed every validator
    Valid,
    /// Last validation run failed; carries the first failing message
    Invalid(String),
}

impl FieldStatus {
    /// Whether the last validation run passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Error message to display, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Invalid(message) => Some(message),
            Self::Pristine | Self::Valid => None,
        }
    }
}

/// One input field: its text, rules, status, and outgoing dependency edges.
///
/// Fields are owned by a [`crate::Form`]; this type only exposes read access.
#[derive(Debug, Clone)]
pub struct Field {
    pub(crate) label: String,
    pub(crate) value: String,
    pub(crate) validators: Vec<Validator>,
    pub(crate) status: FieldStatus,
    /// Arena indices of fields revalidated after this one.
    pub(crate) dependents: Vec<usize>,
    /// Number of validation runs so far.
    pub(crate) revision: u64,
}

impl Field {
    pub(crate) fn new(label: String, validators: Vec<Validator>) -> Self {
        Self {
            label,
            value: String::new(),
            validators,
            status: FieldStatus::Pristine,
            dependents: Vec::new(),
            revision: 0,
        }
    }

    /// Label used in error messages.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Status from the last validation run.
    pub fn status(&self) -> &FieldStatus {
        &self.status
    }

    /// Number of times this field has been validated.
    ///
    /// A UI polling for changes can compare revisions instead of statuses.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
