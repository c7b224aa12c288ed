use axum::extract::State;

use crate::api::{SigninRequest, SignupRequest, TokenResponse};
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /auth/signup - Register and receive a bearer token
pub async fn signup(State(state): State<AppState>, ApiJson(request): ApiJson<SignupRequest>) -> ApiResult<TokenResponse> {
    let token = state.auth.signup(request).await?;
    Ok(ApiResponse::success(token))
}

/// POST /auth/signin - Exchange credentials for a bearer token
pub async fn signin(State(state): State<AppState>, ApiJson(request): ApiJson<SigninRequest>) -> ApiResult<TokenResponse> {
    let token = state.auth.signin(request).await?;
    Ok(ApiResponse::success(token))
}
