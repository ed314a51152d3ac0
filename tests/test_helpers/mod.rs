//! Entity builders and a deterministic clock shared by store tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};
use tasklists::todo::domain::{
    Description, ListId, Task, TaskDetails, TaskList, Title, UserId,
};

/// Clock advancing one second on every reading.
pub struct StepClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl Default for StepClock {
    fn default() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2026, 2, 1, 12, 0, 0)
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
        self.start + TimeDelta::seconds(self.ticks.fetch_add(1, Ordering::SeqCst))
    }
}

/// Builds an unsaved list.
pub fn new_list(clock: &StepClock, owner: Option<UserId>, title: &str) -> TaskList {
    TaskList::new(
        Title::new(title).expect("valid title"),
        None,
        owner,
        clock,
    )
}

/// Builds an unsaved task in `list_id`.
pub fn new_task(clock: &StepClock, list_id: ListId, title: &str, completed: bool) -> Task {
    Task::new(
        TaskDetails {
            list_id,
            title: Title::new(title).expect("valid title"),
            description: Description::new(format!("details for {title}")),
            link: None,
            due_date: None,
            is_completed: completed,
        },
        clock,
    )
}
