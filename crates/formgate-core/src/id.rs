//! Strongly-typed identifiers for forms and their fields.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

/// Counter for unique [`FormId`] allocation.
static FORM_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a [`crate::Form`].
///
/// Two forms never share an ID within a process, so a [`FieldId`] can be
/// checked against the form it is used with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormId(u64);

impl FormId {
    /// Allocate a fresh, unique form ID.
    pub(crate) fn next() -> Self {
        Self(FORM_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a field within a [`crate::Form`].
///
/// Issued by [`crate::Form::add_field`]. `index` is the field's position in
/// the form's arena and is stable for the lifetime of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    pub(crate) form: FormId,
    pub(crate) index: usize,
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.form, self.index)
    }
}
