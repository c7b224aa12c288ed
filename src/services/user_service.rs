use std::sync::Arc;
use tracing::info;

use super::USER_NOT_FOUND;
use crate::api::{ChangePasswordRequest, UserResponse, UserRoleChangeRequest};
use crate::auth::PasswordEncoder;
use crate::database::UserRepository;
use crate::error::ApiError;
use crate::types::UserRole;

pub const WEAK_PASSWORD: &str = "새 비밀번호는 8자 이상이어야 하고, 숫자와 대문자를 포함해야 합니다.";
pub const SAME_PASSWORD: &str = "새 비밀번호는 기존 비밀번호와 같을 수 없습니다.";
pub const WRONG_PASSWORD: &str = "잘못된 비밀번호입니다.";

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    encoder: PasswordEncoder,
}

/// At least 8 characters with one digit and one uppercase letter
fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_uppercase())
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, encoder: PasswordEncoder) -> Self {
        Self { users, encoder }
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserResponse, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::invalid_request(USER_NOT_FOUND))?;

        Ok(UserResponse::from(&user))
    }

    pub async fn change_password(&self, user_id: i64, request: ChangePasswordRequest) -> Result<(), ApiError> {
        if !is_strong_password(&request.new_password) {
            return Err(ApiError::invalid_request(WEAK_PASSWORD));
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::invalid_request(USER_NOT_FOUND))?;

        if self.encoder.matches(&request.new_password, &user.password) {
            return Err(ApiError::invalid_request(SAME_PASSWORD));
        }

        if !self.encoder.matches(&request.old_password, &user.password) {
            return Err(ApiError::invalid_request(WRONG_PASSWORD));
        }

        let encoded = self.encoder.encode(&request.new_password)?;
        self.users.update_password(user.id, &encoded).await?;

        info!(user_id, "password changed");
        Ok(())
    }

    /// Admin operation
    pub async fn change_user_role(&self, user_id: i64, request: UserRoleChangeRequest) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::invalid_request(USER_NOT_FOUND))?;

        let role: UserRole = request.role.parse()?;
        self.users.update_role(user.id, role).await?;

        info!(user_id, role = role.as_str(), "user role changed");
        Ok(())
    }
}
