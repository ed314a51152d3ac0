//! Read models and explicit eager loading of related entities.
//!
//! Relationships are never loaded lazily: services fetch the primary
//! entities first and then attach related ones with a single batched
//! lookup.

use super::{TodoServiceError, TodoServiceResult};
use crate::todo::domain::{ListId, Page, Task, TaskList};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A list together with all of its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListWithTasks {
    #[serde(flatten)]
    list: TaskList,
    tasks: Vec<Task>,
}

impl ListWithTasks {
    /// Returns the list.
    #[must_use]
    pub const fn list(&self) -> &TaskList {
        &self.list
    }

    /// Returns the list's tasks, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// A task together with its owning list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskWithList {
    #[serde(flatten)]
    task: Task,
    list: TaskList,
}

impl TaskWithList {
    pub(super) const fn new(task: Task, list: TaskList) -> Self {
        Self { task, list }
    }

    /// Returns the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the owning list.
    #[must_use]
    pub const fn list(&self) -> &TaskList {
        &self.list
    }
}

/// Returns the identifiers of `lists`, in order.
pub(super) fn list_ids(lists: &[TaskList]) -> Vec<ListId> {
    lists.iter().map(TaskList::id).collect()
}

/// Returns the distinct owning-list identifiers of `tasks`.
pub(super) fn owning_list_ids(tasks: &[Task]) -> Vec<ListId> {
    let mut seen = HashSet::new();
    tasks
        .iter()
        .map(Task::list_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Nests `tasks` under their lists, keeping the order of both inputs.
pub(super) fn attach_tasks(lists: Vec<TaskList>, tasks: Vec<Task>) -> Vec<ListWithTasks> {
    let mut by_list: HashMap<ListId, Vec<Task>> = HashMap::new();
    for task in tasks {
        by_list.entry(task.list_id()).or_default().push(task);
    }

    lists
        .into_iter()
        .map(|list| {
            let tasks = by_list.remove(&list.id()).unwrap_or_default();
            ListWithTasks { list, tasks }
        })
        .collect()
}

/// Attaches the owning list to every task on the page.
///
/// # Errors
///
/// Returns [`TodoServiceError::ListNotFound`] when a task references a list
/// missing from `lists`.
pub(super) fn attach_lists(
    page: Page<Task>,
    lists: Vec<TaskList>,
) -> TodoServiceResult<Page<TaskWithList>> {
    let by_id: HashMap<ListId, TaskList> = lists.into_iter().map(|list| (list.id(), list)).collect();
    page.try_map(|task| {
        let list = by_id
            .get(&task.list_id())
            .cloned()
            .ok_or(TodoServiceError::ListNotFound(task.list_id()))?;
        Ok(TaskWithList::new(task, list))
    })
}
