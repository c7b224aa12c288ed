mod common;

use anyhow::Result;
use common::TestServer;
use reqwest::{Method, StatusCode};
use serde_json::json;
use todo_collab_api::auth::JwtUtil;
use todo_collab_api::types::UserRole;

#[tokio::test]
async fn missing_or_malformed_header_is_unauthorized() -> Result<()> {
    let server = TestServer::spawn().await?;

    let missing = server.request(Method::DELETE, "/admin/comments/1", None, None).await?;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.message(), "Missing or Invalid Token");

    let basic = server.delete("/admin/comments/1", "Basic abc").await?;
    assert_eq!(basic.status, StatusCode::UNAUTHORIZED);
    assert_eq!(basic.message(), "Missing or Invalid Token");
    Ok(())
}

#[tokio::test]
async fn invalid_or_expired_token_is_unauthorized() -> Result<()> {
    let server = TestServer::spawn().await?;

    let forged = JwtUtil::new("some-other-secret", 60)?.create_token(1, "a@a.com", UserRole::Admin)?;
    let response = server.delete("/admin/comments/1", &forged).await?;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid or Expired Token");
    Ok(())
}

#[tokio::test]
async fn non_admin_is_forbidden() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user_id, token) = server.signup("a@a.com", "USER").await?;

    let response = server
        .request(Method::PATCH, &format!("/admin/users/{}", user_id), Some(&token), Some(json!({ "role": "ADMIN" })))
        .await?;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "Admin Role Required");
    Ok(())
}

#[tokio::test]
async fn admin_deletes_comments_and_changes_roles() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, admin) = server.signup("admin@a.com", "ADMIN").await?;
    let (user_id, user) = server.signup("user@a.com", "USER").await?;
    let todo_id = server.create_todo(&user, "Noisy").await?;

    let comment = server.post(&format!("/todos/{}/comments", todo_id), &user, json!({ "contents": "spam" })).await?;
    let comment_id = comment.data()["id"].as_i64().unwrap_or_default();

    let deleted = server.delete(&format!("/admin/comments/{}", comment_id), &admin).await?;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let again = server.delete(&format!("/admin/comments/{}", comment_id), &admin).await?;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.message(), "Comment not found");

    let promoted = server
        .request(Method::PATCH, &format!("/admin/users/{}", user_id), Some(&admin), Some(json!({ "role": "admin" })))
        .await?;
    assert_eq!(promoted.status, StatusCode::NO_CONTENT);

    let bad_role = server
        .request(Method::PATCH, &format!("/admin/users/{}", user_id), Some(&admin), Some(json!({ "role": "ROOT" })))
        .await?;
    assert_eq!(bad_role.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_role.message(), "유효하지 않은 UserRole");
    Ok(())
}
