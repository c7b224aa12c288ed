use std::sync::Arc;
use tracing::{debug, info};

use super::authorization::{
    ensure_manager_of_todo, ensure_not_self_assignment, ensure_owner_for_removal, owner_for_assignment,
};
use super::{MANAGER_NOT_FOUND, TODO_NOT_FOUND, USER_NOT_FOUND};
use crate::api::{ManagerResponse, ManagerSaveRequest, ManagerSaveResponse, UserResponse};
use crate::database::models::NewManager;
use crate::database::{ManagerRepository, TodoRepository, UserRepository};
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Assigns, lists and removes the collaborators of a todo
#[derive(Clone)]
pub struct ManagerService {
    managers: Arc<dyn ManagerRepository>,
    users: Arc<dyn UserRepository>,
    todos: Arc<dyn TodoRepository>,
}

impl ManagerService {
    pub fn new(
        managers: Arc<dyn ManagerRepository>,
        users: Arc<dyn UserRepository>,
        todos: Arc<dyn TodoRepository>,
    ) -> Self {
        Self { managers, users, todos }
    }

    /// Only the todo's creator may register someone else as manager.
    ///
    /// Repeated calls for the same user create separate manager rows.
    pub async fn save_manager(
        &self,
        auth_user: &AuthUser,
        todo_id: i64,
        request: ManagerSaveRequest,
    ) -> Result<ManagerSaveResponse, ApiError> {
        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| ApiError::invalid_request(TODO_NOT_FOUND))?;

        let owner = owner_for_assignment(&todo, auth_user.id).inspect_err(|_| {
            debug!(todo_id, requester = auth_user.id, "manager assignment by non-owner rejected");
        })?;

        let target = self
            .users
            .find_by_id(request.manager_user_id)
            .await?
            .ok_or_else(|| ApiError::invalid_request(USER_NOT_FOUND))?;

        ensure_not_self_assignment(owner, &target)?;

        let manager = self
            .managers
            .save(NewManager { user_id: target.id, todo_id: todo.id })
            .await?;

        info!(todo_id, manager_id = manager.id, user_id = target.id, "manager assigned");

        Ok(ManagerSaveResponse {
            id: manager.id,
            user: UserResponse::from(&target),
        })
    }

    pub async fn get_managers(&self, todo_id: i64) -> Result<Vec<ManagerResponse>, ApiError> {
        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| ApiError::invalid_request(TODO_NOT_FOUND))?;

        let managers = self.managers.find_by_todo_id_with_user(todo.id).await?;
        Ok(managers.iter().map(ManagerResponse::from).collect())
    }

    pub async fn delete_manager(&self, user_id: i64, todo_id: i64, manager_id: i64) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::invalid_request(USER_NOT_FOUND))?;

        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| ApiError::invalid_request(TODO_NOT_FOUND))?;

        ensure_owner_for_removal(&todo, user.id)?;

        let manager = self
            .managers
            .find_by_id(manager_id)
            .await?
            .ok_or_else(|| ApiError::invalid_request(MANAGER_NOT_FOUND))?;

        ensure_manager_of_todo(&manager, todo_id)?;

        self.managers.delete(&manager).await?;
        info!(todo_id, manager_id, "manager removed");
        Ok(())
    }
}
