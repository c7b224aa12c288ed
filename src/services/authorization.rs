//! Ownership rules for collaborator management.
//!
//! Each rule takes entities that were already fetched and returns the first
//! violation as an `InvalidRequest`. Callers run them in order and stop at
//! the first error, so no mutation happens on a rejected request.

use crate::database::models::{Manager, Todo, User};
use crate::error::ApiError;

pub const ONLY_CREATOR_CAN_ASSIGN: &str = "일정을 생성한 유저만 담당자를 지정할 수 있습니다.";
pub const CREATOR_CANNOT_SELF_ASSIGN: &str = "일정 작성자는 본인을 담당자로 등록할 수 없습니다.";
pub const INVALID_TODO_OWNER: &str = "해당 일정을 만든 유저가 유효하지 않습니다.";
pub const MANAGER_NOT_IN_TODO: &str = "해당 일정에 등록된 담당자가 아닙니다.";

/// The todo must have an owner and it must be the requester. Returns the owner.
pub fn owner_for_assignment(todo: &Todo, requester_id: i64) -> Result<&User, ApiError> {
    match todo.user.as_ref() {
        Some(owner) if owner.id == requester_id => Ok(owner),
        _ => Err(ApiError::invalid_request(ONLY_CREATOR_CAN_ASSIGN)),
    }
}

pub fn ensure_not_self_assignment(owner: &User, target: &User) -> Result<(), ApiError> {
    if owner.id == target.id {
        return Err(ApiError::invalid_request(CREATOR_CANNOT_SELF_ASSIGN));
    }
    Ok(())
}

/// A missing owner and a different owner report the same message
pub fn ensure_owner_for_removal(todo: &Todo, requester_id: i64) -> Result<(), ApiError> {
    match todo.user.as_ref() {
        Some(owner) if owner.id == requester_id => Ok(()),
        _ => Err(ApiError::invalid_request(INVALID_TODO_OWNER)),
    }
}

pub fn ensure_manager_of_todo(manager: &Manager, todo_id: i64) -> Result<(), ApiError> {
    if manager.todo_id != todo_id {
        return Err(ApiError::invalid_request(MANAGER_NOT_IN_TODO));
    }
    Ok(())
}
