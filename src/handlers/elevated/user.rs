use axum::{
    extract::{Path, State},
    Extension,
};

use crate::api::UserRoleChangeRequest;
use crate::middleware::{AdminRequestContext, ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;

/// PATCH /admin/users/:userId
pub async fn change_role(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminRequestContext>,
    Path(user_id): Path<i64>,
    ApiJson(request): ApiJson<UserRoleChangeRequest>,
) -> ApiResult<()> {
    state.users.change_user_role(user_id, request).await?;
    tracing::info!(admin_id = admin.user_id, user_id, "role change applied by admin");
    Ok(ApiResponse::no_content())
}
