//! Shared fixtures for list and task service tests.

use crate::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{Task, TaskList, UserId},
    services::{AccessScope, ListForm, ListService, RequestContext, TaskForm, TaskService},
};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

/// Clock advancing one second on every reading.
pub struct StepClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl StepClock {
    pub fn new() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
                .single()
                .expect("valid start instant"),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + TimeDelta::seconds(tick)
    }
}

pub type TestListService = ListService<InMemoryTodoStore, StepClock>;
pub type TestTaskService = TaskService<InMemoryTodoStore, StepClock>;

pub struct Harness {
    pub store: Arc<InMemoryTodoStore>,
    pub lists: TestListService,
    pub tasks: TestTaskService,
}

#[fixture]
pub fn harness() -> Harness {
    let store = Arc::new(InMemoryTodoStore::new());
    let clock = Arc::new(StepClock::new());
    Harness {
        lists: ListService::new(Arc::clone(&store), Arc::clone(&clock)),
        tasks: TaskService::new(Arc::clone(&store), clock),
        store,
    }
}

#[fixture]
pub fn alice() -> AccessScope {
    RequestContext::user(UserId::new()).user_scope()
}

#[fixture]
pub fn bob() -> AccessScope {
    RequestContext::user(UserId::new()).user_scope()
}

#[fixture]
pub fn admin() -> AccessScope {
    RequestContext::admin(UserId::new())
        .admin_scope()
        .expect("admin context yields admin scope")
}

impl Harness {
    pub async fn list(&self, scope: &AccessScope, title: &str) -> TaskList {
        self.lists
            .create(scope, ListForm::new(title))
            .await
            .expect("list creation should succeed")
    }

    pub async fn task(
        &self,
        scope: &AccessScope,
        list: &TaskList,
        title: &str,
        completed: bool,
    ) -> Task {
        self.tasks
            .create(
                scope,
                TaskForm::new(title, list.id()).with_completed(completed),
            )
            .await
            .expect("task creation should succeed")
    }
}
