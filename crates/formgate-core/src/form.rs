//! Field arena and cascade propagation.
//!
//! # Propagation
//!
//! Setting or validating a field runs in one synchronous pass:
//!
//! 1. Revalidate the triggering field.
//! 2. Walk its dependency edges breadth-first, revalidating each reachable
//!    field and following that field's own edges.
//!
//! A visited set seeded with the trigger guarantees each field is
//! revalidated at most once per pass, so diamonds and cycles declared by the
//! caller terminate.
//!
//! ```text
//! set_value(password)
//!        │
//!        ▼
//!   ┌──────────┐   edge    ┌─────────┐
//!   │ password │──────────>│ confirm │   confirm re-runs Matches(password)
//!   └──────────┘           └─────────┘
//! ```

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    error::FormError,
    field::{Field, FieldStatus},
    id::{FieldId, FormId},
    validator::{FieldLookup, Outcome, ValidationContext, Validator},
    watcher::Watcher,
};

/// Status of one field after a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Revalidated field
    pub field: FieldId,
    /// Status it ended up with
    pub status: FieldStatus,
}

/// Report of one propagation pass.
///
/// Lists every revalidated field in visit order; the trigger is always first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation {
    changes: Vec<FieldChange>,
}

impl Propagation {
    /// Changes in visit order.
    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }

    /// Fields revalidated in this pass, in visit order.
    pub fn revalidated(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.changes.iter().map(|change| change.field)
    }

    /// Status of the triggering field.
    pub fn trigger_status(&self) -> Option<&FieldStatus> {
        self.changes.first().map(|change| &change.status)
    }
}

/// Arena of fields belonging to one screen.
///
/// Owns every field and the dependency edges between them. A form is
/// single-threaded: mutate it from one context only.
#[derive(Debug)]
pub struct Form {
    id: FormId,
    fields: Vec<Field>,
    revision: u64,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// Create an empty form.
    pub fn new() -> Self {
        Self { id: FormId::next(), fields: Vec::new(), revision: 0 }
    }

    /// Identifier of this form.
    pub fn id(&self) -> FormId {
        self.id
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bumped once per mutation; lets a UI poll for any change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Add a field with the given validator chain.
    ///
    /// # Errors
    ///
    /// Returns an error if a cross-field validator targets a field that is not
    /// already part of this form.
    pub fn add_field(
        &mut self,
        label: impl Into<String>,
        validators: Vec<Validator>,
    ) -> Result<FieldId, FormError> {
        for target in validators.iter().filter_map(Validator::target) {
            self.slot(target)?;
        }

        let id = FieldId { form: self.id, index: self.fields.len() };
        self.fields.push(Field::new(label.into(), validators));
        Ok(id)
    }

    /// Declare that a change to `source` must revalidate `dependent`.
    ///
    /// Edges form a set; adding an existing edge is a no-op.
    pub fn add_dependent(&mut self, source: FieldId, dependent: FieldId) -> Result<(), FormError> {
        let source = self.slot(source)?;
        let dependent = self.slot(dependent)?;

        let edges = &mut self.fields[source].dependents;
        if !edges.contains(&dependent) {
            edges.push(dependent);
        }
        Ok(())
    }

    /// Field state for `id`.
    pub fn field(&self, id: FieldId) -> Result<&Field, FormError> {
        self.slot(id).map(|slot| &self.fields[slot])
    }

    /// Current text of `id`.
    pub fn value(&self, id: FieldId) -> Result<&str, FormError> {
        self.field(id).map(Field::value)
    }

    /// Status of `id` from its last validation run.
    pub fn status(&self, id: FieldId) -> Result<&FieldStatus, FormError> {
        self.field(id).map(Field::status)
    }

    /// Direct dependents of `id`.
    pub fn dependents(&self, id: FieldId) -> Result<Vec<FieldId>, FormError> {
        let slot = self.slot(id)?;
        Ok(self.fields[slot].dependents.iter().map(|&index| self.field_id(index)).collect())
    }

    /// Replace the text of `id`, then revalidate it and everything that
    /// depends on it.
    pub fn set_value(
        &mut self,
        id: FieldId,
        value: impl Into<String>,
    ) -> Result<Propagation, FormError> {
        let slot = self.slot(id)?;
        self.fields[slot].value = value.into();
        Ok(self.propagate(slot))
    }

    /// Revalidate `id` against its current text and cascade to dependents.
    pub fn validate(&mut self, id: FieldId) -> Result<Propagation, FormError> {
        let slot = self.slot(id)?;
        Ok(self.propagate(slot))
    }

    /// Build a [`Watcher`] over `fields`.
    ///
    /// # Errors
    ///
    /// Returns an error if any field does not belong to this form.
    pub fn watch(&self, fields: &[FieldId]) -> Result<Watcher, FormError> {
        for &field in fields {
            self.slot(field)?;
        }
        Ok(Watcher::new(fields.to_vec()))
    }

    fn slot(&self, id: FieldId) -> Result<usize, FormError> {
        if id.form != self.id {
            return Err(FormError::ForeignField { field: id });
        }
        if id.index >= self.fields.len() {
            return Err(FormError::UnknownField { field: id });
        }
        Ok(id.index)
    }

    fn field_id(&self, index: usize) -> FieldId {
        FieldId { form: self.id, index }
    }

    fn propagate(&mut self, origin: usize) -> Propagation {
        let mut changes = vec![self.revalidate(origin)];

        let mut visited = vec![false; self.fields.len()];
        visited[origin] = true;
        let mut queue: VecDeque<usize> = self.fields[origin].dependents.iter().copied().collect();

        while let Some(slot) = queue.pop_front() {
            if visited[slot] {
                continue;
            }
            visited[slot] = true;
            changes.push(self.revalidate(slot));
            queue.extend(self.fields[slot].dependents.iter().copied().filter(|&next| !visited[next]));
        }

        self.revision += 1;
        debug!(
            form = %self.id,
            trigger = origin,
            revalidated = changes.len(),
            "propagation pass complete"
        );
        Propagation { changes }
    }

    fn revalidate(&mut self, slot: usize) -> FieldChange {
        let status = self.evaluate(slot);
        trace!(form = %self.id, field = slot, ?status, "field revalidated");

        let field = &mut self.fields[slot];
        field.status = status.clone();
        field.revision += 1;
        FieldChange { field: self.field_id(slot), status }
    }

    /// Run the chain fail-fast: the first failing validator decides.
    fn evaluate(&self, slot: usize) -> FieldStatus {
        let field = &self.fields[slot];
        let ctx = ValidationContext::new(&field.label, self);

        field
            .validators
            .iter()
            .find_map(|validator| match validator.evaluate(&field.value, &ctx) {
                Outcome::Pass => None,
                Outcome::Fail(message) => Some(FieldStatus::Invalid(message)),
            })
            .unwrap_or(FieldStatus::Valid)
    }
}

impl FieldLookup for Form {
    fn value_of(&self, field: FieldId) -> Option<&str> {
        self.value(field).ok()
    }

    fn label_of(&self, field: FieldId) -> Option<&str> {
        self.field(field).ok().map(Field::label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::LengthBound;

    #[test]
    fn set_value_validates_and_bumps_revisions() {
        let mut form = Form::new();
        let name = form.add_field("Name", vec![Validator::Required]).unwrap();

        let report = form.set_value(name, "").unwrap();
        assert_eq!(report.trigger_status(), Some(&FieldStatus::Invalid("Name is required".into())));
        assert_eq!(form.field(name).unwrap().revision(), 1);
        assert_eq!(form.revision(), 1);

        form.set_value(name, "Ada").unwrap();
        assert_eq!(form.status(name).unwrap(), &FieldStatus::Valid);
        assert_eq!(form.value(name).unwrap(), "Ada");
        assert_eq!(form.field(name).unwrap().revision(), 2);
        assert_eq!(form.revision(), 2);
    }

    #[test]
    fn validate_on_untouched_field_leaves_pristine() {
        let mut form = Form::new();
        let name = form
            .add_field("Name", vec![Validator::Required, Validator::Length(LengthBound::new(3, 5))])
            .unwrap();
        assert_eq!(form.status(name).unwrap(), &FieldStatus::Pristine);

        form.validate(name).unwrap();
        assert_eq!(form.status(name).unwrap(), &FieldStatus::Invalid("Name is required".into()));
    }

    #[test]
    fn foreign_field_rejected() {
        let mut a = Form::new();
        let mut b = Form::new();
        let from_a = a.add_field("A", vec![]).unwrap();
        b.add_field("B", vec![]).unwrap();

        assert_eq!(b.set_value(from_a, "x"), Err(FormError::ForeignField { field: from_a }));
        assert!(matches!(b.watch(&[from_a]), Err(FormError::ForeignField { .. })));
    }

    #[test]
    fn cross_field_target_must_exist() {
        let mut other = Form::new();
        let stranger = other.add_field("Password", vec![]).unwrap();

        let mut form = Form::new();
        let result = form.add_field("Confirm", vec![Validator::Matches(stranger)]);
        assert!(matches!(result, Err(FormError::ForeignField { .. })));
        assert!(form.is_empty());
    }

    #[test]
    fn unknown_index_rejected() {
        let mut form = Form::new();
        let first = form.add_field("A", vec![]).unwrap();
        let ghost = FieldId { form: form.id(), index: 7 };

        assert_eq!(form.add_dependent(first, ghost), Err(FormError::UnknownField { field: ghost }));
    }

    #[test]
    fn duplicate_edges_collapse() {
        let mut form = Form::new();
        let a = form.add_field("A", vec![]).unwrap();
        let b = form.add_field("B", vec![]).unwrap();

        form.add_dependent(a, b).unwrap();
        form.add_dependent(a, b).unwrap();

        assert_eq!(form.dependents(a).unwrap(), vec![b]);
        assert_eq!(form.dependents(b).unwrap(), vec![]);
    }

    #[test]
    fn self_edge_revalidates_once() {
        let mut form = Form::new();
        let a = form.add_field("A", vec![]).unwrap();
        form.add_dependent(a, a).unwrap();

        let report = form.set_value(a, "x").unwrap();
        assert_eq!(report.revalidated().collect::<Vec<_>>(), vec![a]);
    }
}
