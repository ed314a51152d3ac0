//! Domain model for lists, tasks and the queries run over them.
//!
//! Values are validated on construction so that a [`TaskList`] or [`Task`]
//! held by the service layer always satisfies the persistence constraints.

mod error;
mod ids;
mod list;
mod query;
mod role;
mod task;
mod text;

pub use error::{FieldErrors, ParseCompletionFilterError, ParseRoleError, TodoDomainError};
pub use ids::{ListId, TaskId, UserId};
pub use list::{PersistedListData, TaskList};
pub use query::{
    CompletionFilter, DEFAULT_PER_PAGE, ListQuery, MAX_PER_PAGE, OwnerScope, Page, PageMeta,
    PageRequest, SearchTerm, TaskQuery,
};
pub use role::Role;
pub use task::{PersistedTaskData, Task, TaskDetails};
pub use text::{Description, MAX_LINK_LENGTH, MAX_TITLE_LENGTH, TaskLink, Title};
