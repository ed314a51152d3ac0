//! `/tasks` handlers.

use super::Created;
use crate::http::{
    ApiError, AppState, Flash,
    dto::{
        FlashResponse, IdPath, JsonForm, TaskFilterState, TaskIndexParams, TaskIndexResponse,
        TaskMutation, TaskResponse,
    },
};
use crate::todo::{
    domain::TaskId,
    ports::TodoStore,
    services::{AccessScope, RequestContext, TaskForm, TaskWithList},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use mockable::Clock;

/// `GET /tasks`
pub async fn index<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    Query(params): Query<TaskIndexParams>,
) -> Result<Json<TaskIndexResponse>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    render_index(&state, &context.user_scope(), params).await
}

/// `GET /tasks/{id}`
pub async fn show<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    IdPath(id): IdPath,
) -> Result<Json<TaskResponse<TaskWithList>>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = state
        .tasks
        .find(&context.user_scope(), TaskId::from_uuid(id))
        .await?;
    Ok(Json(TaskResponse { task, flash: None }))
}

/// `POST /tasks`
pub async fn store<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    JsonForm(form): JsonForm<TaskForm>,
) -> Result<Created<TaskMutation>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    create_task(&state, &context.user_scope(), form).await
}

/// `PUT /tasks/{id}`
pub async fn update<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    IdPath(id): IdPath,
    JsonForm(form): JsonForm<TaskForm>,
) -> Result<Json<TaskMutation>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    update_task(&state, &context.user_scope(), TaskId::from_uuid(id), form).await
}

/// `DELETE /tasks/{id}`
pub async fn destroy<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    IdPath(id): IdPath,
) -> Result<Json<FlashResponse>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    delete_task(&state, &context.user_scope(), TaskId::from_uuid(id)).await
}

pub(super) async fn render_index<S, C>(
    state: &AppState<S, C>,
    scope: &AccessScope,
    params: TaskIndexParams,
) -> Result<Json<TaskIndexResponse>, ApiError>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    let filters = params.filters()?;
    let completion = filters.completion;
    let tasks = state.tasks.list(scope, filters).await?;
    let lists = state.lists.options(scope).await?;
    Ok(Json(TaskIndexResponse {
        tasks,
        lists,
        filters: TaskFilterState {
            search: params.search.unwrap_or_default(),
            filter: completion.as_str(),
        },
        flash: Flash::default(),
    }))
}

pub(super) async fn create_task<S, C>(
    state: &AppState<S, C>,
    scope: &AccessScope,
    form: TaskForm,
) -> Result<Created<TaskMutation>, ApiError>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    let task = state.tasks.create(scope, form).await?;
    Ok((
        StatusCode::CREATED,
        Json(TaskResponse {
            task,
            flash: Some(Flash::success("Task created successfully!")),
        }),
    ))
}

pub(super) async fn update_task<S, C>(
    state: &AppState<S, C>,
    scope: &AccessScope,
    id: TaskId,
    form: TaskForm,
) -> Result<Json<TaskMutation>, ApiError>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    let task = state.tasks.update(scope, id, form).await?;
    Ok(Json(TaskResponse {
        task,
        flash: Some(Flash::success("Task updated successfully!")),
    }))
}

pub(super) async fn delete_task<S, C>(
    state: &AppState<S, C>,
    scope: &AccessScope,
    id: TaskId,
) -> Result<Json<FlashResponse>, ApiError>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    state.tasks.delete(scope, id).await?;
    Ok(Json(FlashResponse {
        flash: Flash::success("Task deleted successfully!"),
    }))
}
