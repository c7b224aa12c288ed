mod common;

use anyhow::Result;
use common::TestServer;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn comments_are_saved_and_listed_with_authors() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (owner_id, owner) = server.signup("owner@a.com", "USER").await?;
    let (guest_id, guest) = server.signup("guest@a.com", "USER").await?;
    let todo_id = server.create_todo(&owner, "Discuss").await?;
    let path = format!("/todos/{}/comments", todo_id);

    let saved = server.post(&path, &owner, json!({ "contents": "first" })).await?;
    assert_eq!(saved.status, StatusCode::OK);
    assert_eq!(saved.data()["user"]["id"], owner_id);
    server.post(&path, &guest, json!({ "contents": "second" })).await?;

    let listed = server.get(&path, &guest).await?;
    let comments = listed.data().as_array().cloned().unwrap_or_default();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["contents"], "first");
    assert_eq!(comments[1]["user"], json!({ "id": guest_id, "email": "guest@a.com" }));
    Ok(())
}

#[tokio::test]
async fn unknown_todo_fails_on_save_but_lists_empty() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.signup("a@a.com", "USER").await?;

    let saved = server.post("/todos/9999/comments", &token, json!({ "contents": "hi" })).await?;
    assert_eq!(saved.status, StatusCode::BAD_REQUEST);
    assert_eq!(saved.message(), "Todo not found");

    let listed = server.get("/todos/9999/comments", &token).await?;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.data(), &json!([]));
    Ok(())
}
