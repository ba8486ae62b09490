//! Field rules for the contact form

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Name,
            FormField::Email,
            FormField::Subject,
            FormField::Message,
        ]
    }

    /// Value of the input's `name` attribute
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Subject => "subject",
            FormField::Message => "message",
        }
    }

    /// Id of the inline error element rendered under the field
    pub fn error_slot(&self) -> &'static str {
        match self {
            FormField::Name => "name-error",
            FormField::Email => "email-error",
            FormField::Subject => "subject-error",
            FormField::Message => "message-error",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Subject => "Subject",
            FormField::Message => "Message",
        }
    }

    /// Minimum length in characters after trimming, if the rule is length based
    pub fn min_chars(&self) -> Option<usize> {
        match self {
            FormField::Name => Some(2),
            FormField::Email => None,
            FormField::Subject => Some(5),
            FormField::Message => Some(10),
        }
    }
}

/// One failed rule, carrying the message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
}

impl FieldError {
    pub fn message(&self) -> &'static str {
        match self.field {
            FormField::Name => "Name must be at least 2 characters",
            FormField::Email => "Please enter a valid email address",
            FormField::Subject => "Subject must be at least 5 characters",
            FormField::Message => "Message must be at least 10 characters",
        }
    }
}

/// Check a single field value.
pub fn validate_field(field: FormField, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    let ok = match field.min_chars() {
        Some(min) => value.chars().count() >= min,
        None => EMAIL_RE.is_match(value),
    };
    if ok { Ok(()) } else { Err(FieldError { field }) }
}

/// Current error per field. Entries exist only for invalid fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    errors: BTreeMap<FormField, FieldError>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn message(&self, field: FormField) -> Option<&'static str> {
        self.get(field).map(FieldError::message)
    }

    pub fn set(&mut self, error: FieldError) {
        self.errors.insert(error.field, error);
    }

    pub fn clear(&mut self, field: FormField) {
        self.errors.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    pub fn apply(&mut self, field: FormField, result: Result<(), FieldError>) {
        match result {
            Ok(()) => self.clear(field),
            Err(err) => self.set(err),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.errors.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_needs_two_characters_after_trim() {
        assert!(validate_field(FormField::Name, "A").is_err());
        assert!(validate_field(FormField::Name, "  A  ").is_err());
        assert!(validate_field(FormField::Name, "Al").is_ok());
    }

    #[test]
    fn length_rules_count_characters_not_bytes() {
        // four characters, eight bytes
        assert!(validate_field(FormField::Subject, "ñañá").is_err());
        assert!(validate_field(FormField::Subject, "ñañáñ").is_ok());
    }

    #[test]
    fn email_pattern_is_permissive() {
        assert!(validate_field(FormField::Email, "jane@example.com").is_ok());
        assert!(validate_field(FormField::Email, "a@b.c").is_ok());
        assert!(validate_field(FormField::Email, " jane@example.com ").is_ok());
        assert!(validate_field(FormField::Email, "not-an-email").is_err());
        assert!(validate_field(FormField::Email, "jane@example").is_err());
        assert!(validate_field(FormField::Email, "jane doe@example.com").is_err());
        assert!(validate_field(FormField::Email, "").is_err());
    }

    #[test]
    fn subject_and_message_minimums() {
        assert!(validate_field(FormField::Subject, "hi").is_err());
        assert!(validate_field(FormField::Subject, "Hello").is_ok());
        assert!(validate_field(FormField::Message, "short").is_err());
        assert!(validate_field(FormField::Message, "long enough").is_ok());
    }

    #[test]
    fn error_map_clears_entry_when_field_becomes_valid() {
        let mut errors = ErrorMap::new();
        errors.apply(FormField::Name, validate_field(FormField::Name, "A"));
        assert_eq!(errors.message(FormField::Name), Some("Name must be at least 2 characters"));

        errors.apply(FormField::Name, validate_field(FormField::Name, "Ada"));
        assert!(errors.get(FormField::Name).is_none());
        assert!(errors.is_empty());
    }
}
