//! In-memory store for lists and tasks, used by tests and demo mode.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::todo::{
    domain::{Description, ListId, ListQuery, Page, Task, TaskId, TaskList, TaskQuery},
    ports::{TaskListRepository, TaskRepository, TodoRepositoryError, TodoRepositoryResult},
};

/// Thread-safe in-memory list and task store.
///
/// Deleting a list removes its tasks, mirroring the `ON DELETE CASCADE`
/// foreign key of the `PostgreSQL` schema.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    state: Arc<RwLock<InMemoryTodoState>>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    lists: HashMap<ListId, TaskList>,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTodoState {
    fn is_task_visible(&self, task: &Task, query: &TaskQuery) -> bool {
        self.lists
            .get(&task.list_id())
            .is_some_and(|list| query.scope.admits(list.owner_id()))
    }
}

impl InMemoryTodoStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TodoRepositoryResult<RwLockReadGuard<'_, InMemoryTodoState>> {
        self.state.read().map_err(poisoned)
    }

    fn write(&self) -> TodoRepositoryResult<RwLockWriteGuard<'_, InMemoryTodoState>> {
        self.state.write().map_err(poisoned)
    }
}

fn poisoned<T>(err: PoisonError<T>) -> TodoRepositoryError {
    TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn newest_list_first(left: &TaskList, right: &TaskList) -> Ordering {
    right
        .created_at()
        .cmp(&left.created_at())
        .then_with(|| right.id().cmp(&left.id()))
}

fn newest_task_first(left: &Task, right: &Task) -> Ordering {
    right
        .created_at()
        .cmp(&left.created_at())
        .then_with(|| right.id().cmp(&left.id()))
}

fn task_description(task: &Task) -> Option<&str> {
    task.description().map(Description::as_str)
}

#[async_trait]
impl TaskListRepository for InMemoryTodoStore {
    async fn store_list(&self, list: &TaskList) -> TodoRepositoryResult<()> {
        let mut state = self.write()?;
        if state.lists.contains_key(&list.id()) {
            return Err(TodoRepositoryError::DuplicateList(list.id()));
        }
        state.lists.insert(list.id(), list.clone());
        Ok(())
    }

    async fn update_list(&self, list: &TaskList) -> TodoRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .lists
            .get_mut(&list.id())
            .ok_or(TodoRepositoryError::ListNotFound(list.id()))?;
        *stored = list.clone();
        Ok(())
    }

    async fn delete_list(&self, id: ListId) -> TodoRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .lists
            .remove(&id)
            .ok_or(TodoRepositoryError::ListNotFound(id))?;
        state.tasks.retain(|_, task| task.list_id() != id);
        Ok(())
    }

    async fn find_list(&self, id: ListId) -> TodoRepositoryResult<Option<TaskList>> {
        let state = self.read()?;
        Ok(state.lists.get(&id).cloned())
    }

    async fn find_lists(&self, ids: &[ListId]) -> TodoRepositoryResult<Vec<TaskList>> {
        let state = self.read()?;
        let mut found: Vec<TaskList> = state
            .lists
            .values()
            .filter(|list| ids.contains(&list.id()))
            .cloned()
            .collect();
        found.sort_by(newest_list_first);
        Ok(found)
    }

    async fn search_lists(&self, query: &ListQuery) -> TodoRepositoryResult<Vec<TaskList>> {
        let state = self.read()?;
        let mut found: Vec<TaskList> = state
            .lists
            .values()
            .filter(|list| query.scope.admits(list.owner_id()))
            .filter(|list| {
                query.search.as_ref().is_none_or(|term| {
                    term.matches(
                        list.title().as_str(),
                        list.description().map(Description::as_str),
                    )
                })
            })
            .cloned()
            .collect();
        found.sort_by(newest_list_first);
        Ok(found)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTodoStore {
    async fn store_task(&self, task: &Task) -> TodoRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TodoRepositoryError::DuplicateTask(task.id()));
        }
        if !state.lists.contains_key(&task.list_id()) {
            return Err(TodoRepositoryError::ListNotFound(task.list_id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> TodoRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TodoRepositoryError::TaskNotFound(task.id()));
        }
        if !state.lists.contains_key(&task.list_id()) {
            return Err(TodoRepositoryError::ListNotFound(task.list_id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TodoRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TodoRepositoryError::TaskNotFound(id))
    }

    async fn find_task(&self, id: TaskId) -> TodoRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_tasks_by_lists(&self, list_ids: &[ListId]) -> TodoRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut found: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| list_ids.contains(&task.list_id()))
            .cloned()
            .collect();
        found.sort_by(newest_task_first);
        Ok(found)
    }

    async fn search_tasks(&self, query: &TaskQuery) -> TodoRepositoryResult<Page<Task>> {
        let state = self.read()?;
        let mut matches: Vec<&Task> = state
            .tasks
            .values()
            .filter(|task| state.is_task_visible(task, query))
            .filter(|task| query.completion.admits(task.is_completed()))
            .filter(|task| {
                query
                    .search
                    .as_ref()
                    .is_none_or(|term| term.matches(task.title().as_str(), task_description(task)))
            })
            .collect();
        matches.sort_by(|left, right| newest_task_first(left, right));

        let total = u64::try_from(matches.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let per_page = usize::try_from(query.page.per_page()).unwrap_or(usize::MAX);
        let items = matches
            .into_iter()
            .skip(offset)
            .take(per_page)
            .cloned()
            .collect();
        Ok(Page::new(items, query.page, total))
    }
}
