//! Repository ports for list and task persistence and querying.

use crate::todo::domain::{ListId, ListQuery, Page, Task, TaskId, TaskList, TaskQuery};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// List persistence contract.
#[async_trait]
pub trait TaskListRepository: Send + Sync {
    /// Stores a new list.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateList`] when the identifier
    /// already exists.
    async fn store_list(&self, list: &TaskList) -> TodoRepositoryResult<()>;

    /// Overwrites an existing list.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::ListNotFound`] when the list does not
    /// exist.
    async fn update_list(&self, list: &TaskList) -> TodoRepositoryResult<()>;

    /// Deletes a list together with every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::ListNotFound`] when the list does not
    /// exist.
    async fn delete_list(&self, id: ListId) -> TodoRepositoryResult<()>;

    /// Finds a list by identifier.
    ///
    /// Returns `None` when the list does not exist.
    async fn find_list(&self, id: ListId) -> TodoRepositoryResult<Option<TaskList>>;

    /// Returns the lists among `ids` that exist, in no particular order.
    async fn find_lists(&self, ids: &[ListId]) -> TodoRepositoryResult<Vec<TaskList>>;

    /// Returns every list matching the query, newest first.
    async fn search_lists(&self, query: &ListQuery) -> TodoRepositoryResult<Vec<TaskList>>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateTask`] when the identifier
    /// already exists or [`TodoRepositoryError::ListNotFound`] when the
    /// referenced list does not exist.
    async fn store_task(&self, task: &Task) -> TodoRepositoryResult<()>;

    /// Overwrites an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::TaskNotFound`] when the task does not
    /// exist or [`TodoRepositoryError::ListNotFound`] when the referenced
    /// list does not exist.
    async fn update_task(&self, task: &Task) -> TodoRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn delete_task(&self, id: TaskId) -> TodoRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> TodoRepositoryResult<Option<Task>>;

    /// Returns every task belonging to any of the given lists, newest first.
    async fn find_tasks_by_lists(&self, list_ids: &[ListId]) -> TodoRepositoryResult<Vec<Task>>;

    /// Returns one page of tasks matching the query, newest first.
    async fn search_tasks(&self, query: &TaskQuery) -> TodoRepositoryResult<Page<Task>>;
}

/// Combined store backing both lists and tasks.
///
/// Lists and tasks share referential integrity, so services work against a
/// single store implementing both ports.
pub trait TodoStore: TaskListRepository + TaskRepository {}

impl<T> TodoStore for T where T: TaskListRepository + TaskRepository {}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// A list with the same identifier already exists.
    #[error("duplicate list identifier: {0}")]
    DuplicateList(ListId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The list was not found.
    #[error("list not found: {0}")]
    ListNotFound(ListId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
