//! Router assembly.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /health | `health` |
//! | GET, POST | /lists | `lists::index`, `lists::store` |
//! | GET, PUT, DELETE | /lists/{id} | `lists::show`, `lists::update`, `lists::destroy` |
//! | GET, POST | /tasks | `tasks::index`, `tasks::store` |
//! | GET, PUT, DELETE | /tasks/{id} | `tasks::show`, `tasks::update`, `tasks::destroy` |
//! | GET | /admin/users | `admin::list_overview` |
//! | GET | /admin/user | `admin::task_overview` |
//! | POST | /admin/lists | `admin::store_list` |
//! | PUT, DELETE | /admin/lists/{id} | `admin::update_list`, `admin::destroy_list` |
//! | POST | /admin/tasks | `admin::store_task` |
//! | PUT, DELETE | /admin/tasks/{id} | `admin::update_task`, `admin::destroy_task` |

use super::{
    AppState,
    context::require_admin,
    handlers::{admin, health::health, lists, tasks},
};
use crate::todo::ports::TodoStore;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use mockable::Clock;
use tower_http::trace::TraceLayer;

/// Builds the application router over `state`.
#[must_use]
pub fn create_router<S, C>(state: AppState<S, C>) -> Router
where
    S: TodoStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let admin_routes = Router::new()
        .route("/admin/users", get(admin::list_overview::<S, C>))
        .route("/admin/user", get(admin::task_overview::<S, C>))
        .route("/admin/lists", post(admin::store_list::<S, C>))
        .route(
            "/admin/lists/{id}",
            put(admin::update_list::<S, C>).delete(admin::destroy_list::<S, C>),
        )
        .route("/admin/tasks", post(admin::store_task::<S, C>))
        .route(
            "/admin/tasks/{id}",
            put(admin::update_task::<S, C>).delete(admin::destroy_task::<S, C>),
        )
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/health", get(health))
        .route(
            "/lists",
            get(lists::index::<S, C>).post(lists::store::<S, C>),
        )
        .route(
            "/lists/{id}",
            get(lists::show::<S, C>)
                .put(lists::update::<S, C>)
                .delete(lists::destroy::<S, C>),
        )
        .route(
            "/tasks",
            get(tasks::index::<S, C>).post(tasks::store::<S, C>),
        )
        .route(
            "/tasks/{id}",
            get(tasks::show::<S, C>)
                .put(tasks::update::<S, C>)
                .delete(tasks::destroy::<S, C>),
        )
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
