//! Persistence gateways.
//!
//! Services only see these traits; `postgres` and `memory` provide the
//! implementations.

use async_trait::async_trait;

use crate::database::DatabaseError;
use crate::database::models::{Comment, Manager, NewComment, NewManager, NewTodo, NewUser, Todo, User};
use crate::types::UserRole;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DatabaseError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn save(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn update_password(&self, id: i64, encoded_password: &str) -> Result<(), DatabaseError>;

    async fn update_role(&self, id: i64, role: UserRole) -> Result<(), DatabaseError>;
}

/// One page of todos plus the total row count
#[derive(Debug, Clone)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    pub total: i64,
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Loads the todo with its owner resolved
    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, DatabaseError>;

    async fn save(&self, todo: NewTodo) -> Result<Todo, DatabaseError>;

    /// Newest `modified_at` first
    async fn find_page(&self, offset: i64, limit: i64) -> Result<TodoPage, DatabaseError>;
}

#[async_trait]
pub trait ManagerRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Manager>, DatabaseError>;

    async fn save(&self, manager: NewManager) -> Result<Manager, DatabaseError>;

    async fn delete(&self, manager: &Manager) -> Result<(), DatabaseError>;

    /// Managers of one todo in insertion order, each with its user loaded
    async fn find_by_todo_id_with_user(&self, todo_id: i64) -> Result<Vec<Manager>, DatabaseError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, DatabaseError>;

    async fn save(&self, comment: NewComment) -> Result<Comment, DatabaseError>;

    async fn delete(&self, comment: &Comment) -> Result<(), DatabaseError>;

    /// Comments of one todo in insertion order, each with its user loaded
    async fn find_by_todo_id_with_user(&self, todo_id: i64) -> Result<Vec<Comment>, DatabaseError>;
}
