//! Admin-only route gate.
//!
//! Runs ahead of the JWT middleware on `/admin/*`. A request passes through
//! three checks (bearer header present, token valid, role is ADMIN) and is
//! rejected at the first one that fails. Admitted requests are logged at
//! entry and again on completion with the elapsed time.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{info, warn};

use super::auth::bearer_header;
use crate::auth::JwtUtil;
use crate::error::{ApiError, ErrorClass};
use crate::state::AppState;
use crate::types::UserRole;

pub const MISSING_TOKEN: &str = "Missing or Invalid Token";
pub const INVALID_TOKEN: &str = "Invalid or Expired Token";
pub const ADMIN_REQUIRED: &str = "Admin Role Required";

/// Request-scoped context stamped by the gate
#[derive(Clone, Debug)]
pub struct AdminRequestContext {
    pub started_at: Instant,
    pub user_id: i64,
}

/// Resolve the admin user id or the rejection for this request
fn admit(jwt: &JwtUtil, header: Option<&str>) -> Result<i64, ApiError> {
    let token = header
        .and_then(|value| JwtUtil::substring_token(value).ok())
        .ok_or_else(|| ApiError::unauthorized(MISSING_TOKEN))?;

    let claims = jwt
        .extract_claims(token)
        .map_err(|_| ApiError::unauthorized(INVALID_TOKEN))?;
    let user_id = claims.user_id().map_err(|_| ApiError::unauthorized(INVALID_TOKEN))?;

    if claims.user_role != UserRole::Admin {
        return Err(ApiError::forbidden(ADMIN_REQUIRED));
    }

    Ok(user_id)
}

pub async fn admin_gate_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let user_id = match admit(&state.jwt, bearer_header(request.headers())) {
        Ok(user_id) => user_id,
        Err(err) => {
            warn!(%method, %uri, reason = err.message(), "admin request rejected");
            return err.into_response();
        }
    };

    let context = AdminRequestContext {
        started_at: Instant::now(),
        user_id,
    };
    info!(%method, %uri, user_id, "[REQ] admin request");
    request.extensions_mut().insert(context.clone());

    let response = next.run(request).await;

    let completion = AdminCompletion::of(&context, &response);
    info!(
        %method,
        %uri,
        status = completion.status,
        duration_ms = completion.duration_ms,
        user_id = completion.user_id,
        error = completion.error.unwrap_or("none"),
        "[RES] admin request completed"
    );

    response
}

/// Fields of the `[RES]` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCompletion {
    pub status: u16,
    pub duration_ms: u64,
    pub user_id: i64,
    pub error: Option<&'static str>,
}

impl AdminCompletion {
    pub fn of(context: &AdminRequestContext, response: &Response) -> Self {
        Self {
            status: response.status().as_u16(),
            duration_ms: context.started_at.elapsed().as_millis() as u64,
            user_id: context.user_id,
            error: response.extensions().get::<ErrorClass>().map(|class| class.0),
        }
    }
}
