use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{Claims, JwtError, JwtUtil};
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::UserRole;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
}

impl TryFrom<Claims> for AuthUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.user_id()?,
            email: claims.email,
            role: claims.user_role,
        })
    }
}

/// JWT authentication middleware that validates tokens and injects `AuthUser`
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = bearer_header(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;
    let token = JwtUtil::substring_token(header)?;

    let claims = state.jwt.extract_claims(token)?;
    let auth_user = AuthUser::try_from(claims)?;

    tracing::debug!(user_id = auth_user.id, role = auth_user.role.as_str(), "request authenticated");
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Raw `Authorization` header value, if present and valid UTF-8
pub(crate) fn bearer_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_convert_to_auth_user() {
        let claims = Claims {
            sub: "42".into(),
            email: "a@a.com".into(),
            user_role: UserRole::Admin,
            exp: 0,
            iat: 0,
        };

        let user = AuthUser::try_from(claims).unwrap();
        assert_eq!(user, AuthUser { id: 42, email: "a@a.com".into(), role: UserRole::Admin });
    }

    #[test]
    fn non_numeric_subject_is_rejected() {
        let claims = Claims {
            sub: "abc".into(),
            email: "a@a.com".into(),
            user_role: UserRole::User,
            exp: 0,
            iat: 0,
        };

        assert!(matches!(AuthUser::try_from(claims), Err(JwtError::MalformedSubject(_))));
    }
}
