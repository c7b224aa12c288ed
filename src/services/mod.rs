pub mod auth_service;
pub mod authorization;
pub mod comment_service;
pub mod manager_service;
pub mod todo_service;
pub mod user_service;
pub mod weather;

pub use auth_service::AuthService;
pub use comment_service::CommentService;
pub use manager_service::ManagerService;
pub use todo_service::TodoService;
pub use user_service::UserService;
pub use weather::{FixedWeatherProvider, HttpWeatherProvider, WeatherProvider};

pub(crate) const TODO_NOT_FOUND: &str = "Todo not found";
pub(crate) const USER_NOT_FOUND: &str = "User not found";
pub(crate) const MANAGER_NOT_FOUND: &str = "Manager not found";
pub(crate) const COMMENT_NOT_FOUND: &str = "Comment not found";

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::database::models::{NewTodo, NewUser, Todo, User};
    use crate::database::{MemoryStore, TodoRepository, UserRepository};
    use crate::middleware::AuthUser;
    use crate::types::UserRole;

    pub fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new())
    }

    pub async fn user(store: &MemoryStore, email: &str) -> User {
        UserRepository::save(
            store,
            NewUser { email: email.to_string(), password: "hash".to_string(), role: UserRole::User },
        )
        .await
        .unwrap()
    }

    pub async fn todo(store: &MemoryStore, owner: &User) -> Todo {
        TodoRepository::save(
            store,
            NewTodo {
                title: "title".to_string(),
                contents: "contents".to_string(),
                weather: "Sunny".to_string(),
                user_id: owner.id,
            },
        )
        .await
        .unwrap()
    }

    pub fn auth_user(user: &User) -> AuthUser {
        AuthUser { id: user.id, email: user.email.clone(), role: user.role }
    }
}
