//! Error types for list and task validation and parsing.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors returned while constructing domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title exceeds the persisted column width.
    #[error("title must not be longer than {max} characters, got {actual}")]
    TitleTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Actual length in characters.
        actual: usize,
    },

    /// The link is not an absolute `http` or `https` URL.
    #[error("link '{0}' must be an absolute http or https URL")]
    InvalidLink(String),

    /// The link exceeds the permitted length.
    #[error("link must not be longer than {max} characters, got {actual}")]
    LinkTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Actual length in characters.
        actual: usize,
    },
}

/// Error returned while parsing a completion filter from a query string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown completion filter '{0}', expected all, completed or pending")]
pub struct ParseCompletionFilterError(pub String);

/// Error returned while parsing a caller role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Field-level validation failures keyed by input field name.
///
/// Serializes as a JSON object mapping each field to its messages, in field
/// name order.
#[derive(Debug, Clone, Default, Error, PartialEq, Eq, Serialize)]
#[serde(transparent)]
#[error("invalid input for {}", format_fields(.0))]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an error set holding a single message.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Records a message against a field.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Returns `true` when no field has failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the messages recorded for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns `true` when the field has at least one message.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Iterates over the failed field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns `value` when no errors were recorded, otherwise `self`.
    ///
    /// # Errors
    ///
    /// Returns the collected errors when at least one field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn format_fields(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}
