use std::sync::Arc;
use tracing::info;

use super::{COMMENT_NOT_FOUND, TODO_NOT_FOUND};
use crate::api::{CommentResponse, CommentSaveRequest, CommentSaveResponse, UserResponse};
use crate::database::models::NewComment;
use crate::database::{CommentRepository, TodoRepository};
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    todos: Arc<dyn TodoRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, todos: Arc<dyn TodoRepository>) -> Self {
        Self { comments, todos }
    }

    pub async fn save_comment(
        &self,
        auth_user: &AuthUser,
        todo_id: i64,
        request: CommentSaveRequest,
    ) -> Result<CommentSaveResponse, ApiError> {
        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| ApiError::invalid_request(TODO_NOT_FOUND))?;

        let comment = self
            .comments
            .save(NewComment {
                contents: request.contents,
                user_id: auth_user.id,
                todo_id: todo.id,
            })
            .await?;

        info!(todo_id, comment_id = comment.id, user_id = auth_user.id, "comment saved");

        Ok(CommentSaveResponse {
            id: comment.id,
            contents: comment.contents,
            user: UserResponse {
                id: auth_user.id,
                email: auth_user.email.clone(),
            },
        })
    }

    /// Unlike manager listing, an unknown todo yields an empty list rather than an error
    pub async fn get_comments(&self, todo_id: i64) -> Result<Vec<CommentResponse>, ApiError> {
        let comments = self.comments.find_by_todo_id_with_user(todo_id).await?;
        Ok(comments.iter().map(CommentResponse::from).collect())
    }

    /// Admin-only removal of any comment
    pub async fn delete_comment(&self, comment_id: i64) -> Result<(), ApiError> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ApiError::invalid_request(COMMENT_NOT_FOUND))?;

        self.comments.delete(&comment).await?;
        info!(comment_id, todo_id = comment.todo_id, "comment deleted by admin");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::services::test_support::{auth_user, store, todo, user};

    fn service(store: &Arc<MemoryStore>) -> CommentService {
        CommentService::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn save_comment_on_missing_todo_fails() {
        let store = store();
        let author = user(&store, "email").await;

        let err = service(&store)
            .save_comment(&auth_user(&author), 1, CommentSaveRequest { contents: "contents".into() })
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::invalid_request("Todo not found"));
    }

    #[tokio::test]
    async fn save_comment_returns_commenter_identity() {
        let store = store();
        let author = user(&store, "email").await;
        let todo = todo(&store, &author).await;

        let saved = service(&store)
            .save_comment(&auth_user(&author), todo.id, CommentSaveRequest { contents: "contents".into() })
            .await
            .unwrap();

        assert_eq!(saved.contents, "contents");
        assert_eq!(saved.user, UserResponse { id: author.id, email: "email".into() });
    }

    #[tokio::test]
    async fn get_comments_maps_each_comment() {
        let store = store();
        let first = user(&store, "email1").await;
        let second = user(&store, "email2").await;
        let todo = todo(&store, &first).await;
        let service = service(&store);

        service
            .save_comment(&auth_user(&first), todo.id, CommentSaveRequest { contents: "11111".into() })
            .await
            .unwrap();
        service
            .save_comment(&auth_user(&second), todo.id, CommentSaveRequest { contents: "22222".into() })
            .await
            .unwrap();

        let result = service.get_comments(todo.id).await.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].contents, "11111");
        assert_eq!(result[0].user.email, "email1");
        assert_eq!(result[1].contents, "22222");
        assert_eq!(result[1].user.email, "email2");
    }

    #[tokio::test]
    async fn get_comments_of_unknown_todo_is_empty() {
        let store = store();
        assert!(service(&store).get_comments(1000).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_comment_removes_it() {
        let store = store();
        let author = user(&store, "email").await;
        let todo = todo(&store, &author).await;
        let service = service(&store);
        let saved = service
            .save_comment(&auth_user(&author), todo.id, CommentSaveRequest { contents: "bye".into() })
            .await
            .unwrap();

        service.delete_comment(saved.id).await.unwrap();

        assert!(service.get_comments(todo.id).await.unwrap().is_empty());
        assert_eq!(
            service.delete_comment(saved.id).await.unwrap_err(),
            ApiError::invalid_request("Comment not found")
        );
    }
}
