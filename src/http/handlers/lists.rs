//! `/lists` handlers.

use super::Created;
use crate::http::{
    ApiError, AppState, Flash,
    dto::{
        FlashResponse, IdPath, JsonForm, ListFilterState, ListIndexParams, ListIndexResponse,
        ListMutation, ListResponse,
    },
};
use crate::todo::{
    domain::{ListId, SearchTerm},
    ports::TodoStore,
    services::{AccessScope, ListForm, ListWithTasks, RequestContext},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use mockable::Clock;

/// `GET /lists`
pub async fn index<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    Query(params): Query<ListIndexParams>,
) -> Result<Json<ListIndexResponse>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    render_index(&state, &context.user_scope(), params).await
}

/// `GET /lists/{id}`
pub async fn show<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    IdPath(id): IdPath,
) -> Result<Json<ListResponse<ListWithTasks>>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let list = state
        .lists
        .find(&context.user_scope(), ListId::from_uuid(id))
        .await?;
    Ok(Json(ListResponse { list, flash: None }))
}

/// `POST /lists`
pub async fn store<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    JsonForm(form): JsonForm<ListForm>,
) -> Result<Created<ListMutation>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    create_list(&state, &context.user_scope(), form).await
}

/// `PUT /lists/{id}`
pub async fn update<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    IdPath(id): IdPath,
    JsonForm(form): JsonForm<ListForm>,
) -> Result<Json<ListMutation>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    update_list(&state, &context.user_scope(), ListId::from_uuid(id), form).await
}

/// `DELETE /lists/{id}`
pub async fn destroy<S, C>(
    State(state): State<AppState<S, C>>,
    context: RequestContext,
    IdPath(id): IdPath,
) -> Result<Json<FlashResponse>, ApiError>
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    delete_list(&state, &context.user_scope(), ListId::from_uuid(id)).await
}

pub(super) async fn render_index<S, C>(
    state: &AppState<S, C>,
    scope: &AccessScope,
    params: ListIndexParams,
) -> Result<Json<ListIndexResponse>, ApiError>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    let lists = state
        .lists
        .list(scope, SearchTerm::parse(params.search.as_deref()))
        .await?;
    Ok(Json(ListIndexResponse {
        lists,
        filters: ListFilterState {
            search: params.search.unwrap_or_default(),
        },
        flash: Flash::default(),
    }))
}

pub(super) async fn create_list<S, C>(
    state: &AppState<S, C>,
    scope: &AccessScope,
    form: ListForm,
) -> Result<Created<ListMutation>, ApiError>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    let list = state.lists.create(scope, form).await?;
    Ok((
        StatusCode::CREATED,
        Json(ListResponse {
            list,
            flash: Some(Flash::success("List created successfully!")),
        }),
    ))
}

pub(super) async fn update_list<S, C>(
    state: &AppState<S, C>,
    scope: &AccessScope,
    id: ListId,
    form: ListForm,
) -> Result<Json<ListMutation>, ApiError>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    let list = state.lists.update(scope, id, form).await?;
    Ok(Json(ListResponse {
        list,
        flash: Some(Flash::success("List updated successfully!")),
    }))
}

pub(super) async fn delete_list<S, C>(
    state: &AppState<S, C>,
    scope: &AccessScope,
    id: ListId,
) -> Result<Json<FlashResponse>, ApiError>
where
    S: TodoStore,
    C: Clock + Send + Sync,
{
    state.lists.delete(scope, id).await?;
    Ok(Json(FlashResponse {
        flash: Flash::success("List deleted successfully!"),
    }))
}
