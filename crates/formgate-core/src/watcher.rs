//! Aggregate validation gate.
//!
//! A [`Watcher`] is fixed at construction and keeps no state between calls.
//! It is meant to be consulted right before a side-effecting action such as
//! submitting a form.

use tracing::{debug, warn};

use crate::{form::Form, id::FieldId};

/// All-or-nothing validation gate over a fixed set of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watcher {
    fields: Vec<FieldId>,
}

impl Watcher {
    pub(crate) fn new(fields: Vec<FieldId>) -> Self {
        Self { fields }
    }

    /// Revalidate every held field and report whether all are valid.
    ///
    /// Every field is validated even after one fails, so each error message
    /// becomes visible. Each `validate` cascades to dependents as usual. The
    /// result reflects statuses after all passes completed, so insertion
    /// order does not matter.
    ///
    /// A field that does not belong to `form` fails the gate.
    pub fn validate_all(&self, form: &mut Form) -> bool {
        let mut resolvable = true;
        for &field in &self.fields {
            if let Err(error) = form.validate(field) {
                warn!(%error, "watcher holds a field the form cannot resolve");
                resolvable = false;
            }
        }

        let passed = resolvable
            && self.fields.iter().all(|&field| form.status(field).is_ok_and(|status| status.is_valid()));
        debug!(form = %form.id(), fields = self.fields.len(), passed, "validation gate evaluated");
        passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldStatus, Validator};

    #[test]
    fn empty_watcher_passes() {
        let mut form = Form::new();
        let watcher = form.watch(&[]).unwrap();
        assert!(watcher.validate_all(&mut form));
    }

    #[test]
    fn gate_validates_every_field_even_after_failure() {
        let mut form = Form::new();
        let a = form.add_field("A", vec![Validator::Required]).unwrap();
        let b = form.add_field("B", vec![Validator::Required]).unwrap();
        let watcher = form.watch(&[a, b]).unwrap();

        assert!(!watcher.validate_all(&mut form));
        assert_eq!(form.status(a).unwrap(), &FieldStatus::Invalid("A is required".into()));
        assert_eq!(form.status(b).unwrap(), &FieldStatus::Invalid("B is required".into()));
    }

    #[test]
    fn gate_fails_closed_on_foreign_form() {
        let mut form = Form::new();
        let a = form.add_field("A", vec![]).unwrap();
        let watcher = form.watch(&[a]).unwrap();

        let mut other = Form::new();
        other.add_field("A", vec![]).unwrap();
        assert!(!watcher.validate_all(&mut other));
        assert!(watcher.validate_all(&mut form));
    }
}
