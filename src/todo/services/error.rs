//! Service-level errors for list and task operations.

use crate::todo::{
    domain::{FieldErrors, ListId, TaskId, UserId},
    ports::TodoRepositoryError,
};
use thiserror::Error;

/// Errors returned by list and task services.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// Input validation failed; nothing was written.
    #[error(transparent)]
    Validation(#[from] FieldErrors),

    /// No visible list has the given identifier.
    #[error("list {0} not found")]
    ListNotFound(ListId),

    /// No visible task has the given identifier.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    /// The caller lacks the admin role.
    #[error("user {0} is not allowed to perform admin operations")]
    Forbidden(UserId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TodoRepositoryError),
}

/// Result type for service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;
