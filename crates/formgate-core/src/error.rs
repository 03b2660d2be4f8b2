//! Form error types.
//!
//! A failing validator is not an error: it produces
//! [`crate::FieldStatus::Invalid`]. These errors cover caller mistakes, such
//! as addressing a field that does not exist in the form.

use thiserror::Error;

use crate::id::FieldId;

/// Errors returned by [`crate::Form`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The identifier belongs to this form but no field has that index.
    #[error("unknown field {field}")]
    UnknownField {
        /// Offending identifier
        field: FieldId,
    },

    /// The identifier was issued by a different form.
    #[error("field {field} belongs to another form")]
    ForeignField {
        /// Offending identifier
        field: FieldId,
    },
}
