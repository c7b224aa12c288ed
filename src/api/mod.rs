//! Wire shapes for request bodies and response payloads (camelCase JSON)

pub mod auth;
pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;

pub use auth::{SigninRequest, SignupRequest, TokenResponse};
pub use comment::{CommentResponse, CommentSaveRequest, CommentSaveResponse};
pub use manager::{ManagerResponse, ManagerSaveRequest, ManagerSaveResponse};
pub use todo::{TodoPageQuery, TodoPageResponse, TodoResponse, TodoSaveRequest, TodoSaveResponse};
pub use user::{ChangePasswordRequest, UserResponse, UserRoleChangeRequest};
