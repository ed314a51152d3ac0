//! `/tasks` route tests.

use super::helpers::{Caller, TestApp, app, id_of};
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::json;
use tasklists::todo::domain::UserId;

#[rstest]
#[tokio::test]
async fn create_and_show_task_with_list(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let list = app.create_list(user, "Groceries").await?;

    let created = app
        .send(
            Method::POST,
            "/tasks",
            user,
            Some(json!({
                "title": "Buy milk",
                "list_id": list,
                "link": "https://shop.example/milk",
                "due_date": "2026-06-30",
            })),
        )
        .await?;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["task"]["is_completed"], false);
    assert_eq!(created.body["flash"]["success"], "Task created successfully!");
    let task = id_of(&created.body["task"])?;

    let shown = app
        .send(Method::GET, &format!("/tasks/{task}"), user, None)
        .await?;
    assert_eq!(shown.status, StatusCode::OK);
    assert_eq!(shown.body["task"]["due_date"], "2026-06-30");
    assert_eq!(shown.body["task"]["list"]["title"], "Groceries");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn create_with_foreign_list_is_a_field_error(app: TestApp) -> eyre::Result<()> {
    let owner = Caller::User(UserId::new());
    let intruder = Caller::User(UserId::new());
    let list = app.create_list(owner, "Private").await?;

    let response = app
        .send(
            Method::POST,
            "/tasks",
            intruder,
            Some(json!({ "title": "Sneaky", "list_id": list })),
        )
        .await?;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["errors"]["list_id"],
        json!(["The selected list id is invalid."])
    );
    let owner_view = app.send(Method::GET, "/tasks", owner, None).await?;
    assert_eq!(owner_view.body["tasks"]["total"], 0);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn invalid_fields_are_all_reported(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let response = app
        .send(
            Method::POST,
            "/tasks",
            user,
            Some(json!({ "link": "nope", "due_date": "tomorrow" })),
        )
        .await?;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    for field in ["title", "link", "due_date", "list_id"] {
        assert!(
            response.body["errors"][field].is_array(),
            "missing error for {field}: {}",
            response.body
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn index_paginates_and_echoes_filters(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let list = app.create_list(user, "Backlog").await?;
    for index in 1..=25 {
        app.create_task(user, &list, &format!("task {index}"), false)
            .await?;
    }

    let response = app
        .send(Method::GET, "/tasks?page=3", user, None)
        .await?;

    assert_eq!(response.status, StatusCode::OK);
    let tasks = &response.body["tasks"];
    assert_eq!(tasks["current_page"], 3);
    assert_eq!(tasks["last_page"], 3);
    assert_eq!(tasks["per_page"], 10);
    assert_eq!(tasks["total"], 25);
    assert_eq!(tasks["from"], 21);
    assert_eq!(tasks["to"], 25);
    assert_eq!(tasks["data"][0]["title"], "task 5");
    assert_eq!(tasks["data"][4]["title"], "task 1");
    assert_eq!(
        response.body["filters"],
        json!({ "search": "", "filter": "all" })
    );
    assert_eq!(response.body["lists"][0]["title"], "Backlog");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn pending_filter_counts_incomplete_tasks(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let list = app.create_list(user, "Mixed").await?;
    for (title, completed) in [
        ("a", true),
        ("b", false),
        ("c", true),
        ("d", false),
        ("e", false),
    ] {
        app.create_task(user, &list, title, completed).await?;
    }

    let response = app
        .send(Method::GET, "/tasks?filter=pending", user, None)
        .await?;

    assert_eq!(response.body["tasks"]["total"], 3);
    assert_eq!(response.body["filters"]["filter"], "pending");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn unknown_filter_is_rejected(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let response = app
        .send(Method::GET, "/tasks?filter=archived", user, None)
        .await?;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["errors"]["filter"].is_array());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn page_beyond_last_returns_empty_data(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let list = app.create_list(user, "Short").await?;
    app.create_task(user, &list, "only", false).await?;

    let response = app
        .send(Method::GET, "/tasks?page=9&search=%20", user, None)
        .await?;

    let tasks = &response.body["tasks"];
    assert_eq!(tasks["data"], json!([]));
    assert!(tasks["from"].is_null());
    assert!(tasks["to"].is_null());
    assert_eq!(tasks["last_page"], 1);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn update_and_delete_task(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let list = app.create_list(user, "Home").await?;
    let task = app.create_task(user, &list, "Paint", false).await?;
    let uri = format!("/tasks/{task}");

    let update = app
        .send(
            Method::PUT,
            &uri,
            user,
            Some(json!({ "title": "Paint fence", "list_id": list, "is_completed": true })),
        )
        .await?;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["task"]["title"], "Paint fence");
    assert_eq!(update.body["task"]["is_completed"], true);
    assert_eq!(update.body["flash"]["success"], "Task updated successfully!");

    let delete = app.send(Method::DELETE, &uri, user, None).await?;
    assert_eq!(delete.status, StatusCode::OK);
    assert_eq!(delete.body["flash"]["success"], "Task deleted successfully!");

    let gone = app.send(Method::GET, &uri, user, None).await?;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["message"], "Task not found.");
    Ok(())
}
