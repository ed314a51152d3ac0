//! Port contracts for list and task management.
//!
//! Ports define infrastructure-agnostic interfaces used by the services.

pub mod repository;

pub use repository::{
    TaskListRepository, TaskRepository, TodoRepositoryError, TodoRepositoryResult, TodoStore,
};
