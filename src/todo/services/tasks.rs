//! Task resource operations.

use super::{
    AccessScope, TaskForm, TaskWithList, TodoServiceError, TodoServiceResult,
    input::INVALID_LIST_MESSAGE,
    query::{attach_lists, owning_list_ids},
};
use crate::todo::{
    domain::{
        CompletionFilter, DEFAULT_PER_PAGE, FieldErrors, ListId, Page, PageRequest, SearchTerm,
        Task, TaskId, TaskList, TaskQuery,
    },
    ports::{TodoRepositoryError, TodoStore},
};
use mockable::Clock;
use std::sync::Arc;

/// Parsed filter state of a task listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilters {
    /// Optional search term.
    pub search: Option<SearchTerm>,
    /// Completion-state filter.
    pub completion: CompletionFilter,
    /// One-based requested page.
    pub page: u32,
}

impl Default for TaskFilters {
    fn default() -> Self {
        Self {
            search: None,
            completion: CompletionFilter::All,
            page: 1,
        }
    }
}

impl TaskFilters {
    /// Parses raw query-string values.
    ///
    /// Blank search is ignored; a missing, malformed or non-positive page
    /// selects the first page.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] keyed by `filter` when the completion filter
    /// is not `all`, `completed` or `pending`.
    pub fn parse(
        search: Option<&str>,
        filter: Option<&str>,
        page: Option<&str>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let completion = CompletionFilter::parse(filter).unwrap_or_else(|_| {
            errors.push("filter", "The selected filter is invalid.");
            CompletionFilter::All
        });
        errors.into_result(Self {
            search: SearchTerm::parse(search),
            completion,
            page: PageRequest::parse_number(page),
        })
    }

    /// Sets the search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = SearchTerm::new(search);
        self
    }

    /// Sets the completion filter.
    #[must_use]
    pub const fn with_completion(mut self, completion: CompletionFilter) -> Self {
        self.completion = completion;
        self
    }

    /// Sets the requested page.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Task orchestration service.
pub struct TaskService<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    per_page: u32,
}

impl<S, C> Clone for TaskService<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            per_page: self.per_page,
        }
    }
}

impl<S, C> TaskService<S, C>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task service paging by [`DEFAULT_PER_PAGE`].
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Sets the page size used by [`TaskService::list`].
    #[must_use]
    pub const fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Returns one page of visible tasks matching the filters, newest
    /// first, each with its owning list.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Repository`] when a lookup fails.
    pub async fn list(
        &self,
        scope: &AccessScope,
        filters: TaskFilters,
    ) -> TodoServiceResult<Page<TaskWithList>> {
        let query = TaskQuery::new(scope.visibility())
            .with_search(filters.search)
            .with_completion(filters.completion)
            .with_page(PageRequest::new(filters.page, self.per_page));
        let page = self.store.search_tasks(&query).await?;
        let lists = self
            .store
            .find_lists(&owning_list_ids(page.items()))
            .await?;
        tracing::debug!(
            actor = %scope.actor(),
            page = page.meta().current_page,
            total = page.meta().total,
            filter = query.completion.as_str(),
            "loaded tasks"
        );
        attach_lists(page, lists)
    }

    /// Returns one visible task with its owning list.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::TaskNotFound`] when the task does not
    /// exist or is not visible, or repository errors.
    pub async fn find(&self, scope: &AccessScope, id: TaskId) -> TodoServiceResult<TaskWithList> {
        let (task, list) = self.find_visible(scope, id).await?;
        Ok(TaskWithList::new(task, list))
    }

    /// Creates a task in a visible list.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Validation`] when the form is invalid or
    /// `list_id` does not resolve to a visible list; nothing is persisted in
    /// that case. Returns repository errors otherwise.
    pub async fn create(&self, scope: &AccessScope, form: TaskForm) -> TodoServiceResult<Task> {
        let details = form.validate()?;
        self.ensure_list_available(scope, details.list_id).await?;

        let task = Task::new(details, &*self.clock);
        self.store
            .store_task(&task)
            .await
            .map_err(|err| classify_write_error(err, task.id()))?;
        tracing::info!(
            task_id = %task.id(),
            list_id = %task.list_id(),
            actor = %scope.actor(),
            "task created"
        );
        Ok(task)
    }

    /// Overwrites every field of a visible task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::TaskNotFound`] when the task does not
    /// exist or is not visible, [`TodoServiceError::Validation`] when the
    /// form is invalid or `list_id` does not resolve to a visible list, or
    /// repository errors.
    pub async fn update(
        &self,
        scope: &AccessScope,
        id: TaskId,
        form: TaskForm,
    ) -> TodoServiceResult<Task> {
        let (mut task, _) = self.find_visible(scope, id).await?;
        let details = form.validate()?;
        self.ensure_list_available(scope, details.list_id).await?;

        task.revise(details, &*self.clock);
        self.store
            .update_task(&task)
            .await
            .map_err(|err| classify_write_error(err, id))?;
        tracing::info!(task_id = %id, actor = %scope.actor(), "task updated");
        Ok(task)
    }

    /// Deletes a visible task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::TaskNotFound`] when the task does not
    /// exist or is not visible, or repository errors.
    pub async fn delete(&self, scope: &AccessScope, id: TaskId) -> TodoServiceResult<()> {
        self.find_visible(scope, id).await?;
        self.store
            .delete_task(id)
            .await
            .map_err(|err| classify_write_error(err, id))?;
        tracing::info!(task_id = %id, actor = %scope.actor(), "task deleted");
        Ok(())
    }

    async fn find_visible(
        &self,
        scope: &AccessScope,
        id: TaskId,
    ) -> TodoServiceResult<(Task, TaskList)> {
        let task = self
            .store
            .find_task(id)
            .await?
            .ok_or(TodoServiceError::TaskNotFound(id))?;
        let list = self
            .store
            .find_list(task.list_id())
            .await?
            .filter(|list| scope.admits(list))
            .ok_or(TodoServiceError::TaskNotFound(id))?;
        Ok((task, list))
    }

    async fn ensure_list_available(
        &self,
        scope: &AccessScope,
        list_id: ListId,
    ) -> TodoServiceResult<()> {
        let visible = self
            .store
            .find_list(list_id)
            .await?
            .is_some_and(|list| scope.admits(&list));
        if visible {
            Ok(())
        } else {
            Err(invalid_list().into())
        }
    }
}

fn invalid_list() -> FieldErrors {
    FieldErrors::single("list_id", INVALID_LIST_MESSAGE)
}

/// Maps write failures caused by a concurrently deleted list or task.
fn classify_write_error(err: TodoRepositoryError, id: TaskId) -> TodoServiceError {
    match err {
        TodoRepositoryError::ListNotFound(_) => TodoServiceError::Validation(invalid_list()),
        TodoRepositoryError::TaskNotFound(_) => TodoServiceError::TaskNotFound(id),
        other => TodoServiceError::Repository(other),
    }
}
