//! Validation rules.
//!
//! A [`Validator`] is a total function from a field's current text to an
//! [`Outcome`]. Validators hold configuration only; cross-field rules hold
//! the [`FieldId`] of the field they compare against and read its value
//! through [`FieldLookup`] at evaluation time, so they always see the latest
//! text.
//!
//! Validators know nothing about their neighbours. A field runs its chain in
//! declaration order and stops at the first failure (see
//! [`crate::Form::set_value`]).

use std::fmt;

use bitflags::bitflags;

use crate::id::FieldId;

/// Result of evaluating a single validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The value satisfies the rule.
    Pass,
    /// The value violates the rule.
    Fail(String),
}

/// Read access to other fields' current state.
///
/// Implemented by [`crate::Form`]; cross-field validators use it to resolve
/// the field they reference.
pub trait FieldLookup {
    /// Current text of `field`, or `None` if it cannot be resolved.
    fn value_of(&self, field: FieldId) -> Option<&str>;

    /// Label of `field`, or `None` if it cannot be resolved.
    fn label_of(&self, field: FieldId) -> Option<&str>;
}

/// Everything a validator may read besides the value itself.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    label: &'a str,
    fields: &'a dyn FieldLookup,
}

impl<'a> ValidationContext<'a> {
    /// Context for validating the field labelled `label`.
    pub fn new(label: &'a str, fields: &'a dyn FieldLookup) -> Self {
        Self { label, fields }
    }

    /// Label of the field under validation.
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// Lookup for other fields in the same form.
    pub fn fields(&self) -> &'a dyn FieldLookup {
        self.fields
    }
}

impl fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext").field("label", &self.label).finish_non_exhaustive()
    }
}

/// Inclusive bounds on a value's length, counted in Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBound {
    /// Minimum accepted length
    pub min: usize,
    /// Maximum accepted length
    pub max: usize,
}

impl LengthBound {
    /// Bound accepting lengths in `min..=max`.
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether `len` lies within the bound.
    pub fn contains(&self, len: usize) -> bool {
        (self.min..=self.max).contains(&len)
    }
}

bitflags! {
    /// Character classes a [`Validator::Pattern`] can require.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharClass: u8 {
        /// Uppercase letter
        const UPPER = 1 << 0;
        /// Lowercase letter
        const LOWER = 1 << 1;
        /// ASCII digit
        const DIGIT = 1 << 2;
        /// Anything printable that is not a letter or digit
        const SYMBOL = 1 << 3;
    }
}

impl CharClass {
    /// Class of a single character. Whitespace belongs to no class.
    pub fn of(c: char) -> Self {
        if c.is_uppercase() {
            Self::UPPER
        } else if c.is_lowercase() {
            Self::LOWER
        } else if c.is_ascii_digit() {
            Self::DIGIT
        } else if c.is_whitespace() || c.is_control() {
            Self::empty()
        } else {
            Self::SYMBOL
        }
    }

    /// Union of the classes present in `value`.
    pub fn present_in(value: &str) -> Self {
        value.chars().fold(Self::empty(), |acc, c| acc | Self::of(c))
    }

    fn describe(self) -> &'static str {
        if self.contains(Self::UPPER) {
            "an uppercase letter"
        } else if self.contains(Self::LOWER) {
            "a lowercase letter"
        } else if self.contains(Self::DIGIT) {
            "a digit"
        } else {
            "a symbol"
        }
    }
}

/// A single validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// Fails when the value is empty or whitespace only.
    Required,

    /// Fails when the value's length is outside the bound.
    Length(LengthBound),

    /// Fails when the value lacks any of the required character classes.
    Pattern(CharClass),

    /// Fails when the value differs from another field's current value.
    Matches(FieldId),
}

impl Validator {
    /// Field this validator reads besides its own, if any.
    pub fn target(&self) -> Option<FieldId> {
        match self {
            Self::Matches(target) => Some(*target),
            Self::Required | Self::Length(_) | Self::Pattern(_) => None,
        }
    }

    /// Evaluate the rule against `value`.
    ///
    /// Total: never panics and has no side effects.
    pub fn evaluate(&self, value: &str, ctx: &ValidationContext<'_>) -> Outcome {
        let label = ctx.label();
        match self {
            Self::Required => {
                if value.trim().is_empty() {
                    Outcome::Fail(format!("{label} is required"))
                } else {
                    Outcome::Pass
                }
            },
            Self::Length(bound) => {
                if bound.contains(value.chars().count()) {
                    Outcome::Pass
                } else {
                    Outcome::Fail(format!(
                        "{label} must be between {} and {} characters",
                        bound.min, bound.max
                    ))
                }
            },
            Self::Pattern(required) => {
                let missing = required.difference(CharClass::present_in(value));
                match missing.iter().next() {
                    None => Outcome::Pass,
                    Some(class) => {
                        Outcome::Fail(format!("{label} must contain {}", class.describe()))
                    },
                }
            },
            Self::Matches(target) => {
                let fields = ctx.fields();
                let other = fields.label_of(*target).unwrap_or("the referenced field");
                match fields.value_of(*target) {
                    Some(expected) if expected == value => Outcome::Pass,
                    _ => Outcome::Fail(format!("{label} does not match {other}")),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::FormId;

    struct OneField {
        id: FieldId,
        value: &'static str,
    }

    impl FieldLookup for OneField {
        fn value_of(&self, field: FieldId) -> Option<&str> {
            (field == self.id).then_some(self.value)
        }

        fn label_of(&self, field: FieldId) -> Option<&str> {
            (field == self.id).then_some("Password")
        }
    }

    fn lookup(value: &'static str) -> OneField {
        OneField { id: FieldId { form: FormId::next(), index: 0 }, value }
    }

    #[test]
    fn required_rejects_blank() {
        let fields = lookup("");
        let ctx = ValidationContext::new("Name", &fields);

        assert_eq!(
            Validator::Required.evaluate("", &ctx),
            Outcome::Fail("Name is required".into())
        );
        assert_ne!(Validator::Required.evaluate("   ", &ctx), Outcome::Pass);
        assert_eq!(Validator::Required.evaluate(" a ", &ctx), Outcome::Pass);
    }

    #[test]
    fn length_bound_is_inclusive() {
        let fields = lookup("");
        let ctx = ValidationContext::new("User Name", &fields);
        let rule = Validator::Length(LengthBound::new(3, 5));

        assert_ne!(rule.evaluate("ab", &ctx), Outcome::Pass);
        assert_eq!(rule.evaluate("abc", &ctx), Outcome::Pass);
        assert_eq!(rule.evaluate("abcde", &ctx), Outcome::Pass);
        assert_eq!(
            rule.evaluate("abcdef", &ctx),
            Outcome::Fail("User Name must be between 3 and 5 characters".into())
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let fields = lookup("");
        let ctx = ValidationContext::new("Name", &fields);
        let rule = Validator::Length(LengthBound::new(3, 3));

        assert_eq!(rule.evaluate("äöü", &ctx), Outcome::Pass);
    }

    #[test]
    fn pattern_reports_first_missing_class() {
        let fields = lookup("");
        let ctx = ValidationContext::new("Password", &fields);
        let rule = Validator::Pattern(CharClass::UPPER | CharClass::LOWER | CharClass::DIGIT);

        assert_eq!(
            rule.evaluate("secret", &ctx),
            Outcome::Fail("Password must contain an uppercase letter".into())
        );
        assert_eq!(
            rule.evaluate("Secret", &ctx),
            Outcome::Fail("Password must contain a digit".into())
        );
        assert_eq!(rule.evaluate("Secret1", &ctx), Outcome::Pass);
    }

    #[test]
    fn char_class_of_symbols_and_whitespace() {
        assert_eq!(CharClass::of('!'), CharClass::SYMBOL);
        assert_eq!(CharClass::of(' '), CharClass::empty());
        assert_eq!(CharClass::present_in("a1!"), CharClass::LOWER | CharClass::DIGIT | CharClass::SYMBOL);
    }

    #[test]
    fn matches_reads_live_value() {
        let fields = lookup("Secret1");
        let ctx = ValidationContext::new("Confirm Password", &fields);
        let rule = Validator::Matches(fields.id);

        assert_eq!(rule.evaluate("Secret1", &ctx), Outcome::Pass);
        assert_eq!(
            rule.evaluate("Secret2", &ctx),
            Outcome::Fail("Confirm Password does not match Password".into())
        );
    }

    #[test]
    fn matches_unresolvable_target_fails() {
        let fields = lookup("x");
        let ctx = ValidationContext::new("Confirm", &fields);
        let stranger = FieldId { form: FormId::next(), index: 0 };

        assert_ne!(Validator::Matches(stranger).evaluate("x", &ctx), Outcome::Pass);
    }
}
