use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{SigninRequest, SignupRequest, TokenResponse};
use crate::auth::{JwtUtil, PasswordEncoder};
use crate::database::models::NewUser;
use crate::database::UserRepository;
use crate::error::ApiError;
use crate::types::UserRole;

pub const DUPLICATE_EMAIL: &str = "이미 존재하는 이메일입니다.";
pub const UNKNOWN_EMAIL: &str = "가입되지 않은 유저입니다.";
pub const WRONG_PASSWORD: &str = "잘못된 비밀번호입니다.";

/// Signup and signin, both answering with a bearer token
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtUtil>,
    encoder: PasswordEncoder,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: Arc<JwtUtil>, encoder: PasswordEncoder) -> Self {
        Self { users, jwt, encoder }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<TokenResponse, ApiError> {
        if self.users.exists_by_email(&request.email).await? {
            return Err(ApiError::invalid_request(DUPLICATE_EMAIL));
        }

        let role: UserRole = request.user_role.parse()?;
        let password = self.encoder.encode(&request.password)?;

        let user = self
            .users
            .save(NewUser {
                email: request.email,
                password,
                role,
            })
            .await?;

        info!(user_id = user.id, role = role.as_str(), "user signed up");

        let bearer_token = self.jwt.create_token(user.id, &user.email, user.role)?;
        Ok(TokenResponse { bearer_token })
    }

    pub async fn signin(&self, request: SigninRequest) -> Result<TokenResponse, ApiError> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| ApiError::invalid_request(UNKNOWN_EMAIL))?;

        if !self.encoder.matches(&request.password, &user.password) {
            warn!(user_id = user.id, "signin rejected: password mismatch");
            return Err(ApiError::unauthorized(WRONG_PASSWORD));
        }

        let bearer_token = self.jwt.create_token(user.id, &user.email, user.role)?;
        Ok(TokenResponse { bearer_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::store;

    fn service() -> (AuthService, Arc<JwtUtil>) {
        let jwt = Arc::new(JwtUtil::new("test-secret", 60).unwrap());
        (AuthService::new(store(), jwt.clone(), PasswordEncoder::new(4)), jwt)
    }

    fn signup(email: &str, role: &str) -> SignupRequest {
        SignupRequest {
            email: email.into(),
            password: "Password1".into(),
            user_role: role.into(),
        }
    }

    #[tokio::test]
    async fn signup_issues_token_with_role() {
        let (service, jwt) = service();

        let token = service.signup(signup("a@a.com", "admin")).await.unwrap();

        assert!(token.bearer_token.starts_with("Bearer "));
        let claims = jwt.extract_claims(&token.bearer_token).unwrap();
        assert_eq!(claims.email, "a@a.com");
        assert_eq!(claims.user_role, UserRole::Admin);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (service, _) = service();
        service.signup(signup("a@a.com", "USER")).await.unwrap();

        let err = service.signup(signup("a@a.com", "USER")).await.unwrap_err();
        assert_eq!(err, ApiError::invalid_request(DUPLICATE_EMAIL));
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let (service, _) = service();
        let err = service.signup(signup("a@a.com", "ROOT")).await.unwrap_err();
        assert_eq!(err, ApiError::invalid_request("유효하지 않은 UserRole"));
    }

    #[tokio::test]
    async fn signin_checks_email_then_password() {
        let (service, jwt) = service();
        service.signup(signup("a@a.com", "USER")).await.unwrap();

        let err = service
            .signin(SigninRequest { email: "b@b.com".into(), password: "Password1".into() })
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::invalid_request(UNKNOWN_EMAIL));

        let err = service
            .signin(SigninRequest { email: "a@a.com".into(), password: "Wrong".into() })
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::unauthorized(WRONG_PASSWORD));

        let token = service
            .signin(SigninRequest { email: "a@a.com".into(), password: "Password1".into() })
            .await
            .unwrap();
        assert_eq!(jwt.get_user_role(&token.bearer_token).unwrap(), UserRole::User);
    }
}
