//! Task entity and its editable details.

use super::{Description, ListId, TaskId, TaskLink, Title};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated, editable fields of a task.
///
/// Creation and update both take a complete set of details; there is no
/// partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// Owning list.
    pub list_id: ListId,
    /// Task title.
    pub title: Title,
    /// Optional description.
    pub description: Option<Description>,
    /// Optional external reference.
    pub link: Option<TaskLink>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Completion flag.
    pub is_completed: bool,
}

/// Unit of work belonging to exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    list_id: ListId,
    title: Title,
    description: Option<Description>,
    link: Option<TaskLink>,
    due_date: Option<NaiveDate>,
    is_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted editable fields.
    pub details: TaskDetails,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from validated details.
    #[must_use]
    pub fn new(details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self::assemble(TaskId::new(), details, timestamp, timestamp)
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self::assemble(data.id, data.details, data.created_at, data.updated_at)
    }

    fn assemble(
        id: TaskId,
        details: TaskDetails,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let TaskDetails {
            list_id,
            title,
            description,
            link,
            due_date,
            is_completed,
        } = details;
        Self {
            id,
            list_id,
            title,
            description,
            link,
            due_date,
            is_completed,
            created_at,
            updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning list identifier.
    #[must_use]
    pub const fn list_id(&self) -> ListId {
        self.list_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Returns the external link, if any.
    #[must_use]
    pub const fn link(&self) -> Option<&TaskLink> {
        self.link.as_ref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns `true` once the task has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrites every editable field, including the owning list.
    pub fn revise(&mut self, details: TaskDetails, clock: &impl Clock) {
        let revised = Self::assemble(self.id, details, self.created_at, clock.utc());
        *self = revised;
    }
}
