//! Diesel row models for list and task persistence.

use super::schema::{lists, tasks};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for lists.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListRow {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Option<uuid::Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert model for lists.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lists)]
pub struct NewListRow {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Option<uuid::Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full-overwrite changeset for lists; `None` clears the description.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = lists)]
#[diesel(treat_none_as_null = true)]
pub struct ListChangeset {
    pub title: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Query result row for tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    pub id: uuid::Uuid,
    pub list_id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert model for tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    pub id: uuid::Uuid,
    pub list_id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full-overwrite changeset for tasks; `None` clears optional columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    pub list_id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub updated_at: DateTime<Utc>,
}
