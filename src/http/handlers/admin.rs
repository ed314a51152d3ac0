//! `/admin` handlers.
//!
//! Routes are guarded by [`require_admin`](crate::http::require_admin);
//! each handler still derives its scope through
//! [`RequestContext::admin_scope`] so a mis-mounted route cannot widen
//! visibility.

use super::{Created, lists, tasks};
use crate::http::{
    ApiError, AppState,
    dto::{
        FlashResponse, IdPath, JsonForm, ListIndexParams, ListIndexResponse, ListMutation,
        TaskIndexParams, TaskIndexResponse, TaskMutation,
    },
};
use crate::todo::{
    domain::{ListId, TaskId},
    ports::TodoStore,
    services::{ListForm, RequestContext, TaskForm},
};
use axum::{
    Json,
    extract::{Query, State},
};
use mockable::Clock;

/// `GET /admin/users`: every list with its tasks.
pub async fn list_overview<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    Query(params): Query<ListIndexParams>,
) -> Result<Json<ListIndexResponse>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    lists::render_index(&state, &context.admin_scope()?, params).await
}

/// `GET /admin/user`: every task, paginated.
pub async fn task_overview<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    Query(params): Query<TaskIndexParams>,
) -> Result<Json<TaskIndexResponse>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    tasks::render_index(&state, &context.admin_scope()?, params).await
}

/// `POST /admin/lists`: creates an unowned list.
pub async fn store_list<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    JsonForm(form): JsonForm<ListForm>,
) -> Result<Created<ListMutation>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    lists::create_list(&state, &context.admin_scope()?, form).await
}

/// `PUT /admin/lists/{id}`
pub async fn update_list<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    IdPath(id): IdPath,
    JsonForm(form): JsonForm<ListForm>,
) -> Result<Json<ListMutation>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    lists::update_list(&state, &context.admin_scope()?, ListId::from_uuid(id), form).await
}

/// `DELETE /admin/lists/{id}`
pub async fn destroy_list<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    IdPath(id): IdPath,
) -> Result<Json<FlashResponse>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    lists::delete_list(&state, &context.admin_scope()?, ListId::from_uuid(id)).await
}

/// `POST /admin/tasks`: creates a task in any list.
pub async fn store_task<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    JsonForm(form): JsonForm<TaskForm>,
) -> Result<Created<TaskMutation>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    tasks::create_task(&state, &context.admin_scope()?, form).await
}

/// `PUT /admin/tasks/{id}`
pub async fn update_task<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    IdPath(id): IdPath,
    JsonForm(form): JsonForm<TaskForm>,
) -> Result<Json<TaskMutation>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    tasks::update_task(&state, &context.admin_scope()?, TaskId::from_uuid(id), form).await
}

/// `DELETE /admin/tasks/{id}`
pub async fn destroy_task<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    IdPath(id): IdPath,
) -> Result<Json<FlashResponse>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    tasks::delete_task(&state, &context.admin_scope()?, TaskId::from_uuid(id)).await
}
