//! Validated text values shared by lists and tasks.

use super::TodoDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Maximum title length in characters, matching `VARCHAR(255)`.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum link length in characters.
pub const MAX_LINK_LENGTH: usize = 2048;

/// Non-empty title of a list or task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Creates a validated title, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyTitle`] when nothing remains after
    /// trimming, or [`TodoDomainError::TitleTooLong`] when the title exceeds
    /// [`MAX_TITLE_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyTitle);
        }

        let length = trimmed.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(TodoDomainError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Free-form description; blank input is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Creates a description, returning `None` for blank input.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let raw = value.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// External reference attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskLink(String);

impl TaskLink {
    /// Creates a validated link.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::LinkTooLong`] when the link exceeds
    /// [`MAX_LINK_LENGTH`] characters and [`TodoDomainError::InvalidLink`]
    /// when it is not an absolute `http` or `https` URL with a host.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        let length = trimmed.chars().count();
        if length > MAX_LINK_LENGTH {
            return Err(TodoDomainError::LinkTooLong {
                max: MAX_LINK_LENGTH,
                actual: length,
            });
        }

        if !has_http_authority(trimmed) {
            return Err(TodoDomainError::InvalidLink(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the link as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskLink {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskLink {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

fn has_http_authority(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    Url::parse(value).is_ok_and(|parsed| {
        matches!(parsed.scheme(), "http" | "https")
            && parsed.host_str().is_some_and(|host| !host.is_empty())
    })
}
