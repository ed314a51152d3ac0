//! `PostgreSQL` adapters for list and task persistence.

mod migrations;
mod models;
mod repository;
mod schema;

pub use migrations::{CREATE_LISTS_AND_TASKS_SQL, apply_migrations};
pub use repository::{PostgresTodoStore, TodoPgPool, build_pool};
