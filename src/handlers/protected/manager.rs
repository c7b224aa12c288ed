use axum::{
    extract::{Path, State},
    Extension,
};

use crate::api::{ManagerResponse, ManagerSaveRequest, ManagerSaveResponse};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// POST /todos/:todoId/managers
pub async fn save(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(todo_id): Path<i64>,
    ApiJson(request): ApiJson<ManagerSaveRequest>,
) -> ApiResult<ManagerSaveResponse> {
    let manager = state.managers.save_manager(&auth_user, todo_id, request).await?;
    Ok(ApiResponse::success(manager))
}

/// GET /todos/:todoId/managers
pub async fn list(State(state): State<AppState>, Path(todo_id): Path<i64>) -> ApiResult<Vec<ManagerResponse>> {
    let managers = state.managers.get_managers(todo_id).await?;
    Ok(ApiResponse::success(managers))
}

/// DELETE /todos/:todoId/managers/:managerId - the caller is the requester
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((todo_id, manager_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    state.managers.delete_manager(auth_user.id, todo_id, manager_id).await?;
    Ok(ApiResponse::no_content())
}
