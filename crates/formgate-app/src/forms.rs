//! Field wiring for the auth screens.
//!
//! Each screen owns one [`Form`], declares its fields and dependency edges
//! once at construction, and builds a [`Watcher`] over the fields that gate
//! submission.

use formgate_core::{
    CharClass, FieldId, FieldStatus, Form, FormError, LengthBound, Propagation, Validator, Watcher,
};
use formgate_proto::{LoginRequest, RegisterRequest};

use crate::state::FieldKey;

/// Password strength requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Accepted length
    pub length: LengthBound,
    /// Character classes that must all be present
    pub classes: CharClass,
}

/// Thresholds for the auth screens' validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Accepted username length
    pub username: LengthBound,
    /// Accepted display name length
    pub name: LengthBound,
    /// Password strength on sign-up
    pub password: PasswordPolicy,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            username: LengthBound::new(3, 50),
            name: LengthBound::new(3, 50),
            password: PasswordPolicy {
                length: LengthBound::new(8, 64),
                classes: CharClass::UPPER | CharClass::LOWER | CharClass::DIGIT,
            },
        }
    }
}

/// A form whose fields are addressed by [`FieldKey`].
#[derive(Debug)]
struct KeyedForm {
    form: Form,
    keys: Vec<(FieldKey, FieldId)>,
    watcher: Watcher,
}

impl KeyedForm {
    fn id(&self, key: FieldKey) -> Option<FieldId> {
        self.keys.iter().find(|(k, _)| *k == key).map(|(_, id)| *id)
    }

    fn value(&self, key: FieldKey) -> &str {
        self.id(key).and_then(|id| self.form.value(id).ok()).unwrap_or_default()
    }

    fn status(&self, key: FieldKey) -> Option<&FieldStatus> {
        self.id(key).and_then(|id| self.form.status(id).ok())
    }

    fn set(&mut self, key: FieldKey, value: String) -> Option<Propagation> {
        let id = self.id(key)?;
        self.form.set_value(id, value).ok()
    }

    fn errors(&self) -> Vec<(FieldKey, String)> {
        self.keys
            .iter()
            .filter_map(|(key, id)| {
                let message = self.form.status(*id).ok()?.error()?;
                Some((*key, message.to_string()))
            })
            .collect()
    }

    fn gate(&mut self) -> bool {
        self.watcher.validate_all(&mut self.form)
    }
}

/// Sign-up screen: username, display name, password, and confirmation.
///
/// The confirmation field depends on the password field, so editing the
/// password re-checks the confirmation immediately. The gate covers every
/// field, so a stale confirmation blocks submission.
#[derive(Debug)]
pub struct SignUpForm {
    inner: KeyedForm,
}

impl SignUpForm {
    /// Build the form with the given thresholds.
    pub fn new(rules: &ValidationRules) -> Result<Self, FormError> {
        let mut form = Form::new();
        let username = form.add_field(
            "User Name",
            vec![Validator::Required, Validator::Length(rules.username)],
        )?;
        let name = form.add_field("Name", vec![Validator::Required, Validator::Length(rules.name)])?;
        let password = form.add_field(
            "Password",
            vec![
                Validator::Required,
                Validator::Length(rules.password.length),
                Validator::Pattern(rules.password.classes),
            ],
        )?;
        let confirm = form.add_field("Confirm Password", vec![Validator::Matches(password)])?;
        form.add_dependent(password, confirm)?;

        let watcher = form.watch(&[username, name, password, confirm])?;
        let keys = vec![
            (FieldKey::Username, username),
            (FieldKey::Name, name),
            (FieldKey::Password, password),
            (FieldKey::ConfirmPassword, confirm),
        ];
        Ok(Self { inner: KeyedForm { form, keys, watcher } })
    }

    /// Field identifier for `key`, if this screen has it.
    pub fn field(&self, key: FieldKey) -> Option<FieldId> {
        self.inner.id(key)
    }

    /// Current text of `key`.
    pub fn value(&self, key: FieldKey) -> &str {
        self.inner.value(key)
    }

    /// Status of `key`.
    pub fn status(&self, key: FieldKey) -> Option<&FieldStatus> {
        self.inner.status(key)
    }

    /// Set `key` and cascade. `None` if this screen has no such field.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) -> Option<Propagation> {
        self.inner.set(key, value.into())
    }

    /// Fields currently showing an error.
    pub fn errors(&self) -> Vec<(FieldKey, String)> {
        self.inner.errors()
    }

    /// Run the validation gate; on success build the request.
    pub fn gate(&mut self) -> Option<RegisterRequest> {
        if !self.inner.gate() {
            return None;
        }
        Some(RegisterRequest {
            username: self.value(FieldKey::Username).to_string(),
            password: self.value(FieldKey::Password).to_string(),
            name: self.value(FieldKey::Name).to_string(),
        })
    }
}

/// Login screen: username and password, both required.
#[derive(Debug)]
pub struct LoginForm {
    inner: KeyedForm,
}

impl LoginForm {
    /// Build the form.
    pub fn new() -> Result<Self, FormError> {
        let mut form = Form::new();
        let username = form.add_field("User Name", vec![Validator::Required])?;
        let password = form.add_field("Password", vec![Validator::Required])?;

        let watcher = form.watch(&[username, password])?;
        let keys = vec![(FieldKey::Username, username), (FieldKey::Password, password)];
        Ok(Self { inner: KeyedForm { form, keys, watcher } })
    }

    /// Field identifier for `key`, if this screen has it.
    pub fn field(&self, key: FieldKey) -> Option<FieldId> {
        self.inner.id(key)
    }

    /// Current text of `key`.
    pub fn value(&self, key: FieldKey) -> &str {
        self.inner.value(key)
    }

    /// Status of `key`.
    pub fn status(&self, key: FieldKey) -> Option<&FieldStatus> {
        self.inner.status(key)
    }

    /// Set `key` and revalidate. `None` if this screen has no such field.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) -> Option<Propagation> {
        self.inner.set(key, value.into())
    }

    /// Fields currently showing an error.
    pub fn errors(&self) -> Vec<(FieldKey, String)> {
        self.inner.errors()
    }

    /// Run the validation gate; on success build the request.
    pub fn gate(&mut self) -> Option<LoginRequest> {
        if !self.inner.gate() {
            return None;
        }
        Some(LoginRequest {
            username: self.value(FieldKey::Username).to_string(),
            password: self.value(FieldKey::Password).to_string(),
        })
    }
}
