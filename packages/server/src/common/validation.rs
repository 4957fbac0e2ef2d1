//! Field validation shared by the intake and installer forms.
//!
//! Checks are presence and pattern only. Every failing field is collected so
//! callers can show all of them at once; `first()` gives the summary message.

use lazy_static::lazy_static;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

lazy_static! {
    // Same shape the back-office forms have always accepted: dotted local
    // part or quoted string, then a bracketed IPv4 literal or a dotted host
    // ending in a 2+ letter TLD.
    static ref EMAIL_REGEX: Regex = Regex::new(
        r#"(?i)^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#
    ).unwrap();
}

/// Returns true when `email` has the shape of an address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// True for empty and whitespace-only strings
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Per-field error messages, in the order fields were checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, Vec<String>)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field, vec![message])),
        }
    }

    /// Record the standard "X is required" message if `value` is blank
    pub fn require(&mut self, field: &'static str, label: &str, value: &str) -> bool {
        if is_blank(value) {
            self.push(field, format!("{} is required", label));
            return false;
        }
        true
    }

    /// Required and well-formed email
    pub fn require_email(&mut self, field: &'static str, value: &str) {
        if self.require(field, "Email", value) && !is_valid_email(value.trim()) {
            self.push(field, "Email is invalid");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the failing fields
    pub fn fields(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(f, _)| *f).collect()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_slice())
    }

    /// The first message of the first failing field
    pub fn first(&self) -> Option<(&'static str, &str)> {
        self.entries
            .first()
            .and_then(|(f, m)| m.first().map(|msg| (*f, msg.as_str())))
    }

    /// Ok when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors: self })
        }
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

/// Input failed validation; nothing was persisted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .errors.first().map(|(_, m)| m).unwrap_or("Invalid input"))]
pub struct ValidationError {
    pub errors: FieldErrors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("email@example.com"));
        assert!(is_valid_email("first.last@sub.example.co.uk"));
        assert!(is_valid_email("USER@EXAMPLE.COM"));
        assert!(is_valid_email("someone@[192.168.0.1]"));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("two words@example.com"));
        assert!(!is_valid_email("user@example.c"));
    }

    #[test]
    fn test_require_collects_in_order() {
        let mut errors = FieldErrors::new();
        errors.require("name", "Name", "  ");
        errors.require("city", "City", "Leeds");
        errors.require_email("email", "");

        assert_eq!(errors.fields(), vec!["name", "email"]);
        assert_eq!(errors.first(), Some(("name", "Name is required")));
        assert_eq!(errors.get("email").unwrap(), ["Email is required".to_string()]);
    }

    #[test]
    fn test_invalid_email_reported_once() {
        let mut errors = FieldErrors::new();
        errors.require_email("email", "nope");
        assert_eq!(errors.get("email").unwrap(), ["Email is invalid".to_string()]);
    }

    #[test]
    fn test_validation_error_message_is_first_error() {
        let mut errors = FieldErrors::new();
        errors.push("postal_code", "Postal Code is required");
        errors.push("email", "Email is invalid");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Postal Code is required");
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut errors = FieldErrors::new();
        errors.push("name", "Name is required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"name": ["Name is required"]}));
    }
}
