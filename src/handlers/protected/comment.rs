use axum::{
    extract::{Path, State},
    Extension,
};

use crate::api::{CommentResponse, CommentSaveRequest, CommentSaveResponse};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// POST /todos/:todoId/comments
pub async fn save(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(todo_id): Path<i64>,
    ApiJson(request): ApiJson<CommentSaveRequest>,
) -> ApiResult<CommentSaveResponse> {
    let comment = state.comments.save_comment(&auth_user, todo_id, request).await?;
    Ok(ApiResponse::success(comment))
}

/// GET /todos/:todoId/comments
pub async fn list(State(state): State<AppState>, Path(todo_id): Path<i64>) -> ApiResult<Vec<CommentResponse>> {
    let comments = state.comments.get_comments(todo_id).await?;
    Ok(ApiResponse::success(comments))
}
