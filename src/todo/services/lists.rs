//! List resource operations.

use super::{
    AccessScope, ListForm, ListWithTasks, TodoServiceError, TodoServiceResult,
    query::{attach_tasks, list_ids},
};
use crate::todo::{
    domain::{ListId, ListQuery, SearchTerm, TaskList},
    ports::{TodoRepositoryError, TodoStore},
};
use mockable::Clock;
use std::sync::Arc;

/// List orchestration service.
pub struct ListService<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for ListService<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> ListService<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    /// Creates a new list service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Returns every visible list matching `search`, each with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Repository`] when a lookup fails.
    pub async fn list(
        &self,
        scope: &AccessScope,
        search: Option<SearchTerm>,
    ) -> TodoServiceResult<Vec<ListWithTasks>> {
        let query = ListQuery::new(scope.visibility()).with_search(search);
        let lists = self.store.search_lists(&query).await?;
        let tasks = self.store.find_tasks_by_lists(&list_ids(&lists)).await?;
        tracing::debug!(
            actor = %scope.actor(),
            lists = lists.len(),
            tasks = tasks.len(),
            "loaded lists"
        );
        Ok(attach_tasks(lists, tasks))
    }

    /// Returns every visible list without tasks, for use as form options.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Repository`] when the lookup fails.
    pub async fn options(&self, scope: &AccessScope) -> TodoServiceResult<Vec<TaskList>> {
        let query = ListQuery::new(scope.visibility());
        Ok(self.store.search_lists(&query).await?)
    }

    /// Returns one visible list with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ListNotFound`] when the list does not
    /// exist or is not visible, or repository errors.
    pub async fn find(&self, scope: &AccessScope, id: ListId) -> TodoServiceResult<ListWithTasks> {
        let list = self.find_visible(scope, id).await?;
        let tasks = self.store.find_tasks_by_lists(&[id]).await?;
        attach_tasks(vec![list], tasks)
            .into_iter()
            .next()
            .ok_or(TodoServiceError::ListNotFound(id))
    }

    /// Creates a list, owned according to the scope.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Validation`] when the form is invalid, or
    /// repository errors.
    pub async fn create(&self, scope: &AccessScope, form: ListForm) -> TodoServiceResult<TaskList> {
        let draft = form.validate()?;
        let list = TaskList::new(
            draft.title,
            draft.description,
            scope.new_list_owner(),
            &*self.clock,
        );
        self.store.store_list(&list).await?;
        tracing::info!(list_id = %list.id(), actor = %scope.actor(), "list created");
        Ok(list)
    }

    /// Overwrites the title and description of a visible list.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ListNotFound`] when the list does not
    /// exist or is not visible, [`TodoServiceError::Validation`] when the
    /// form is invalid, or repository errors.
    pub async fn update(
        &self,
        scope: &AccessScope,
        id: ListId,
        form: ListForm,
    ) -> TodoServiceResult<TaskList> {
        let mut list = self.find_visible(scope, id).await?;
        let draft = form.validate()?;
        list.revise(draft.title, draft.description, &*self.clock);
        self.store
            .update_list(&list)
            .await
            .map_err(|err| not_found_as_list(err, id))?;
        tracing::info!(list_id = %id, actor = %scope.actor(), "list updated");
        Ok(list)
    }

    /// Deletes a visible list and every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ListNotFound`] when the list does not
    /// exist or is not visible, or repository errors.
    pub async fn delete(&self, scope: &AccessScope, id: ListId) -> TodoServiceResult<()> {
        self.find_visible(scope, id).await?;
        self.store
            .delete_list(id)
            .await
            .map_err(|err| not_found_as_list(err, id))?;
        tracing::info!(list_id = %id, actor = %scope.actor(), "list deleted with its tasks");
        Ok(())
    }

    async fn find_visible(&self, scope: &AccessScope, id: ListId) -> TodoServiceResult<TaskList> {
        self.store
            .find_list(id)
            .await?
            .filter(|list| scope.admits(list))
            .ok_or(TodoServiceError::ListNotFound(id))
    }
}

fn not_found_as_list(err: TodoRepositoryError, id: ListId) -> TodoServiceError {
    match err {
        TodoRepositoryError::ListNotFound(_) => TodoServiceError::ListNotFound(id),
        other => TodoServiceError::Repository(other),
    }
}
