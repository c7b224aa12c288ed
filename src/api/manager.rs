use serde::{Deserialize, Serialize};

use super::UserResponse;
use crate::database::models::Manager;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerSaveRequest {
    pub manager_user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerSaveResponse {
    pub id: i64,
    pub user: UserResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerResponse {
    pub id: i64,
    pub user: UserResponse,
}

impl From<&Manager> for ManagerResponse {
    fn from(manager: &Manager) -> Self {
        Self {
            id: manager.id,
            user: UserResponse::from(&manager.user),
        }
    }
}
