//! `/lists` route tests.

use super::helpers::{Caller, TestApp, app};
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::{Value, json};
use tasklists::todo::domain::UserId;

#[rstest]
#[tokio::test]
async fn health_needs_no_identity(app: TestApp) -> eyre::Result<()> {
    let response = app
        .send(Method::GET, "/health", Caller::Anonymous, None)
        .await?;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    Ok(())
}

#[rstest]
#[case("/lists")]
#[case("/tasks")]
#[tokio::test]
async fn resource_routes_require_identity(app: TestApp, #[case] uri: &str) -> eyre::Result<()> {
    let response = app.send(Method::GET, uri, Caller::Anonymous, None).await?;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["flash"]["error"], "Unauthenticated.");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn create_returns_list_with_flash(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let response = app
        .send(
            Method::POST,
            "/lists",
            user,
            Some(json!({ "title": "  Groceries ", "description": "weekly" })),
        )
        .await?;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["list"]["title"], "Groceries");
    assert_eq!(response.body["list"]["description"], "weekly");
    assert_eq!(
        response.body["flash"],
        json!({ "success": "List created successfully!", "error": null })
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn invalid_create_returns_field_errors(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let response = app
        .send(Method::POST, "/lists", user, Some(json!({ "title": "" })))
        .await?;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["errors"]["title"],
        json!(["The title field is required."])
    );
    assert_eq!(response.body["flash"]["success"], Value::Null);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn index_searches_and_echoes_filter(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let groceries = app.create_list(user, "Groceries").await?;
    app.create_list(user, "Work").await?;
    app.create_task(user, &groceries, "Milk", false).await?;

    let response = app
        .send(Method::GET, "/lists?search=grocer", user, None)
        .await?;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["filters"], json!({ "search": "grocer" }));
    let lists = &response.body["lists"];
    assert_eq!(lists.as_array().map(Vec::len), Some(1));
    assert_eq!(lists[0]["title"], "Groceries");
    assert_eq!(lists[0]["tasks"][0]["title"], "Milk");
    assert_eq!(
        response.body["flash"],
        json!({ "success": null, "error": null })
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn other_users_lists_are_not_found(app: TestApp) -> eyre::Result<()> {
    let owner = Caller::User(UserId::new());
    let stranger = Caller::User(UserId::new());
    let list = app.create_list(owner, "Private").await?;
    let uri = format!("/lists/{list}");

    let show = app.send(Method::GET, &uri, stranger, None).await?;
    assert_eq!(show.status, StatusCode::NOT_FOUND);
    assert_eq!(show.body["message"], "List not found.");

    let update = app
        .send(Method::PUT, &uri, stranger, Some(json!({ "title": "Mine now" })))
        .await?;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let delete = app.send(Method::DELETE, &uri, stranger, None).await?;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let index = app.send(Method::GET, "/lists", stranger, None).await?;
    assert_eq!(index.body["lists"], json!([]));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn update_then_delete_cascades(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let list = app.create_list(user, "Home").await?;
    let task = app.create_task(user, &list, "Fix tap", false).await?;
    let uri = format!("/lists/{list}");

    let update = app
        .send(Method::PUT, &uri, user, Some(json!({ "title": "House" })))
        .await?;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["list"]["title"], "House");
    assert_eq!(update.body["flash"]["success"], "List updated successfully!");

    let delete = app.send(Method::DELETE, &uri, user, None).await?;
    assert_eq!(delete.status, StatusCode::OK);
    assert_eq!(delete.body["flash"]["success"], "List deleted successfully!");

    let orphan = app
        .send(Method::GET, &format!("/tasks/{task}"), user, None)
        .await?;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn malformed_identifier_is_not_found(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let response = app
        .send(Method::GET, "/lists/not-a-uuid", user, None)
        .await?;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn malformed_body_is_rejected_with_error_envelope(app: TestApp) -> eyre::Result<()> {
    let user = Caller::User(UserId::new());
    let response = app
        .send(Method::POST, "/lists", user, Some(json!({ "title": 42 })))
        .await?;
    assert!(response.status.is_client_error());
    assert!(response.body["flash"]["error"].is_string());
    Ok(())
}
