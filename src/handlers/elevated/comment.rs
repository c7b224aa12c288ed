use axum::{
    extract::{Path, State},
    Extension,
};

use crate::middleware::{AdminRequestContext, ApiResponse, ApiResult};
use crate::state::AppState;

/// DELETE /admin/comments/:commentId
pub async fn delete(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminRequestContext>,
    Path(comment_id): Path<i64>,
) -> ApiResult<()> {
    state.comments.delete_comment(comment_id).await?;
    tracing::info!(admin_id = admin.user_id, comment_id, "comment removed by admin");
    Ok(ApiResponse::no_content())
}
