//! Application services for list and task operations.
//!
//! Every operation takes an [`AccessScope`] derived from the caller's
//! [`RequestContext`]; admin variants are the same operations run under
//! [`RequestContext::admin_scope`].

mod context;
mod error;
mod input;
mod lists;
mod query;
mod tasks;

pub use context::{AccessScope, RequestContext};
pub use error::{TodoServiceError, TodoServiceResult};
pub use input::{ListDraft, ListForm, TaskForm};
pub use lists::ListService;
pub use query::{ListWithTasks, TaskWithList};
pub use tasks::{TaskFilters, TaskService};
