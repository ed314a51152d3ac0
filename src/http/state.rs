//! Shared router state.

use crate::todo::{
    ports::TodoStore,
    services::{ListService, TaskService},
};
use mockable::Clock;
use std::sync::Arc;

/// Services shared by every handler.
pub struct AppState<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    /// List operations.
    pub lists: ListService<S, C>,
    /// Task operations.
    pub tasks: TaskService<S, C>,
}

impl<S, C> AppState<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    /// Builds both services over one store and clock, paging tasks by
    /// `per_page`.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>, per_page: u32) -> Self {
        Self {
            lists: ListService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: TaskService::new(store, clock).with_per_page(per_page),
        }
    }
}

impl<S, C> Clone for AppState<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            lists: self.lists.clone(),
            tasks: self.tasks.clone(),
        }
    }
}
