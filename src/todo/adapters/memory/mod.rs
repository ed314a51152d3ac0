//! In-memory adapters for list and task persistence.

mod store;

pub use store::InMemoryTodoStore;
