use axum::{
    extract::{Path, Query, State},
    Extension,
};

use crate::api::{TodoPageQuery, TodoPageResponse, TodoResponse, TodoSaveRequest, TodoSaveResponse};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// POST /todos
pub async fn save(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(request): ApiJson<TodoSaveRequest>,
) -> ApiResult<TodoSaveResponse> {
    let todo = state.todos.save_todo(&auth_user, request).await?;
    Ok(ApiResponse::success(todo))
}

/// GET /todos?page=&size=
pub async fn list(State(state): State<AppState>, Query(query): Query<TodoPageQuery>) -> ApiResult<TodoPageResponse> {
    let page = state.todos.get_todos(query).await?;
    Ok(ApiResponse::success(page))
}

/// GET /todos/:todoId
pub async fn get(State(state): State<AppState>, Path(todo_id): Path<i64>) -> ApiResult<TodoResponse> {
    let todo = state.todos.get_todo(todo_id).await?;
    Ok(ApiResponse::success(todo))
}
