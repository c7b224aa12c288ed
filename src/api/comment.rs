use serde::{Deserialize, Serialize};

use super::UserResponse;
use crate::database::models::Comment;

#[derive(Debug, Clone, Deserialize)]
pub struct CommentSaveRequest {
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSaveResponse {
    pub id: i64,
    pub contents: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub contents: String,
    pub user: UserResponse,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            contents: comment.contents.clone(),
            user: UserResponse::from(&comment.user),
        }
    }
}
