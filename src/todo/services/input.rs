//! Form inputs and their validation into domain values.
//!
//! Validation collects every failing field before returning, so callers can
//! report all problems at once.

use crate::todo::domain::{
    Description, FieldErrors, ListId, MAX_TITLE_LENGTH, TaskDetails, TaskLink, Title,
    TodoDomainError,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

pub(super) const INVALID_LIST_MESSAGE: &str = "The selected list id is invalid.";

/// Submitted list fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListForm {
    /// Required title.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Validated list fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDraft {
    /// Validated title.
    pub title: Title,
    /// Description, absent when blank.
    pub description: Option<Description>,
}

impl ListForm {
    /// Creates a form with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the submitted fields.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] keyed by `title` when the title is missing,
    /// blank or too long.
    pub fn validate(self) -> Result<ListDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = validate_title(self.title, &mut errors);
        let description = self.description.and_then(Description::new);

        match title {
            Some(validated) if errors.is_empty() => Ok(ListDraft {
                title: validated,
                description,
            }),
            _ => Err(errors),
        }
    }
}

/// Submitted task fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskForm {
    /// Required title.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional external link.
    #[serde(default)]
    pub link: Option<String>,
    /// Optional `YYYY-MM-DD` due date.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Required owning list identifier.
    #[serde(default)]
    pub list_id: Option<String>,
    /// Completion flag; defaults to `false`.
    #[serde(default)]
    pub is_completed: Option<bool>,
}

impl TaskForm {
    /// Creates a form with the required title and owning list.
    #[must_use]
    pub fn new(title: impl Into<String>, list_id: ListId) -> Self {
        Self {
            title: Some(title.into()),
            list_id: Some(list_id.to_string()),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }

    /// Validates the submitted fields.
    ///
    /// Whether the list exists is checked by the service, not here.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] keyed by `title`, `link`, `due_date` and
    /// `list_id` for every field that fails.
    pub fn validate(self) -> Result<TaskDetails, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = validate_title(self.title, &mut errors);
        let link = validate_link(self.link, &mut errors);
        let due_date = validate_due_date(self.due_date, &mut errors);
        let list_id = validate_list_id(self.list_id, &mut errors);
        let description = self.description.and_then(Description::new);

        match (title, list_id) {
            (Some(validated_title), Some(validated_list)) if errors.is_empty() => {
                Ok(TaskDetails {
                    list_id: validated_list,
                    title: validated_title,
                    description,
                    link,
                    due_date,
                    is_completed: self.is_completed.unwrap_or(false),
                })
            }
            _ => Err(errors),
        }
    }
}

fn validate_title(title: Option<String>, errors: &mut FieldErrors) -> Option<Title> {
    let Some(raw) = title else {
        errors.push("title", "The title field is required.");
        return None;
    };

    match Title::new(raw) {
        Ok(validated) => Some(validated),
        Err(TodoDomainError::TitleTooLong { .. }) => {
            errors.push(
                "title",
                format!("The title field must not be greater than {MAX_TITLE_LENGTH} characters."),
            );
            None
        }
        Err(_) => {
            errors.push("title", "The title field is required.");
            None
        }
    }
}

fn validate_link(link: Option<String>, errors: &mut FieldErrors) -> Option<TaskLink> {
    let raw = link.filter(|value| !value.trim().is_empty())?;
    match TaskLink::new(raw) {
        Ok(validated) => Some(validated),
        Err(TodoDomainError::LinkTooLong { max, .. }) => {
            errors.push(
                "link",
                format!("The link field must not be greater than {max} characters."),
            );
            None
        }
        Err(_) => {
            errors.push("link", "The link field must be a valid URL.");
            None
        }
    }
}

fn validate_due_date(due_date: Option<String>, errors: &mut FieldErrors) -> Option<NaiveDate> {
    let raw = due_date.filter(|value| !value.trim().is_empty())?;
    if let Ok(parsed) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Some(parsed)
    } else {
        errors.push("due_date", "The due date field must be a valid date.");
        None
    }
}

fn validate_list_id(list_id: Option<String>, errors: &mut FieldErrors) -> Option<ListId> {
    let Some(raw) = list_id.filter(|value| !value.trim().is_empty()) else {
        errors.push("list_id", "The list id field is required.");
        return None;
    };

    if let Ok(uuid) = Uuid::parse_str(raw.trim()) {
        Some(ListId::from_uuid(uuid))
    } else {
        errors.push("list_id", INVALID_LIST_MESSAGE);
        None
    }
}
