use axum::{
    extract::{Path, State},
    Extension,
};

use crate::api::{ChangePasswordRequest, UserResponse};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /users/:userId
pub async fn get(State(state): State<AppState>, Path(user_id): Path<i64>) -> ApiResult<UserResponse> {
    let user = state.users.get_user(user_id).await?;
    Ok(ApiResponse::success(user))
}

/// PUT /users - change the caller's own password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> ApiResult<()> {
    state.users.change_password(auth_user.id, request).await?;
    Ok(ApiResponse::no_content())
}
