//! Request parameters and response envelopes.

use super::ApiError;
use crate::todo::{
    domain::{Page, Task, TaskList},
    services::{ListWithTasks, TaskFilters, TaskWithList},
};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JSON body extractor whose rejections render as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonForm<T>(pub T);

/// Resource identifier path segment; malformed identifiers render as 404.
#[derive(Debug, Clone, Copy, Deserialize, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct IdPath(pub Uuid);

/// One-shot notification returned alongside a response.
///
/// Both keys are always present; the unused one is `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flash {
    /// Success notification.
    pub success: Option<String>,
    /// Error notification.
    pub error: Option<String>,
}

impl Flash {
    /// Creates a success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(message.into()),
            error: None,
        }
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: None,
            error: Some(message.into()),
        }
    }
}

/// Query parameters of list index routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListIndexParams {
    /// Free-text search over title and description.
    pub search: Option<String>,
}

/// Query parameters of task index routes.
///
/// Values are kept raw so malformed input can be normalised rather than
/// rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskIndexParams {
    /// Free-text search over title and description.
    pub search: Option<String>,
    /// `all`, `completed` or `pending`.
    pub filter: Option<String>,
    /// One-based page number.
    pub page: Option<String>,
}

impl TaskIndexParams {
    /// Parses the parameters into service filters.
    ///
    /// # Errors
    ///
    /// Returns a 422 [`ApiError`] when `filter` is not recognised.
    pub fn filters(&self) -> Result<TaskFilters, ApiError> {
        TaskFilters::parse(
            self.search.as_deref(),
            self.filter.as_deref(),
            self.page.as_deref(),
        )
        .map_err(ApiError::validation)
    }
}

/// Echoed filter state of a list index.
#[derive(Debug, Clone, Serialize)]
pub struct ListFilterState {
    /// Search term as submitted; empty when absent.
    pub search: String,
}

/// Echoed filter state of a task index.
#[derive(Debug, Clone, Serialize)]
pub struct TaskFilterState {
    /// Search term as submitted; empty when absent.
    pub search: String,
    /// Completion filter applied.
    pub filter: &'static str,
}

/// Body of `GET /lists` and `GET /admin/users`.
#[derive(Debug, Serialize)]
pub struct ListIndexResponse {
    /// Visible lists, each with its tasks.
    pub lists: Vec<ListWithTasks>,
    /// Echoed filter state.
    pub filters: ListFilterState,
    /// Empty notification.
    pub flash: Flash,
}

/// Body of `GET /tasks` and `GET /admin/user`.
#[derive(Debug, Serialize)]
pub struct TaskIndexResponse {
    /// Requested page of tasks with their lists.
    pub tasks: Page<TaskWithList>,
    /// Visible lists, for task form options.
    pub lists: Vec<TaskList>,
    /// Echoed filter state.
    pub filters: TaskFilterState,
    /// Empty notification.
    pub flash: Flash,
}

/// Body carrying one list.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    /// The list.
    pub list: T,
    /// Notification describing the mutation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

/// Body carrying one task.
#[derive(Debug, Serialize)]
pub struct TaskResponse<T> {
    /// The task.
    pub task: T,
    /// Notification describing the mutation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

/// Body of deletions.
#[derive(Debug, Serialize)]
pub struct FlashResponse {
    /// Notification describing the deletion.
    pub flash: Flash,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `ok` when the process answers.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

/// Mutated list with its success notification.
pub type ListMutation = ListResponse<TaskList>;

/// Mutated task with its success notification.
pub type TaskMutation = TaskResponse<Task>;
