//! In-process store implementing every gateway trait.
//!
//! Follows the same referential rules as `migrations/`: inserts need their
//! referenced rows, deleting a user nulls the owner of its todos and drops its
//! managers and comments. Backs the test suites and `serve --memory`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::models::{Comment, Manager, NewComment, NewManager, NewTodo, NewUser, Todo, User};
use crate::database::repository::{CommentRepository, ManagerRepository, TodoPage, TodoRepository, UserRepository};
use crate::database::DatabaseError;
use crate::types::UserRole;

#[derive(Debug, Clone)]
struct TodoRow {
    title: String,
    contents: String,
    weather: String,
    user_id: Option<i64>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct ManagerRow {
    user_id: i64,
    todo_id: i64,
}

#[derive(Debug, Clone)]
struct CommentRow {
    contents: String,
    user_id: i64,
    todo_id: i64,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    todos: BTreeMap<i64, TodoRow>,
    managers: BTreeMap<i64, ManagerRow>,
    comments: BTreeMap<i64, CommentRow>,
    last_id: i64,
}

impl Tables {
    /// Ids come from one sequence so they never collide across tables
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn user(&self, id: i64, owner: &str) -> Result<User, DatabaseError> {
        self.users
            .get(&id)
            .cloned()
            .ok_or_else(|| DatabaseError::DanglingReference(format!("{} references missing user {}", owner, id)))
    }

    fn todo(&self, id: i64, row: &TodoRow) -> Todo {
        Todo {
            id,
            title: row.title.clone(),
            contents: row.contents.clone(),
            weather: row.weather.clone(),
            user: row.user_id.and_then(|uid| self.users.get(&uid).cloned()),
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }

    fn manager(&self, id: i64, row: &ManagerRow) -> Result<Manager, DatabaseError> {
        Ok(Manager {
            id,
            user: self.user(row.user_id, "manager")?,
            todo_id: row.todo_id,
        })
    }

    fn comment(&self, id: i64, row: &CommentRow) -> Result<Comment, DatabaseError> {
        Ok(Comment {
            id,
            contents: row.contents.clone(),
            user: self.user(row.user_id, "comment")?,
            todo_id: row.todo_id,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }

    fn require_todo(&self, id: i64) -> Result<(), DatabaseError> {
        if self.todos.contains_key(&id) {
            Ok(())
        } else {
            Err(DatabaseError::DanglingReference(format!("missing todo {}", id)))
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a user with the schema's ON DELETE behaviour
    pub async fn delete_user(&self, id: i64) -> bool {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return false;
        }
        for todo in tables.todos.values_mut() {
            if todo.user_id == Some(id) {
                todo.user_id = None;
            }
        }
        tables.managers.retain(|_, m| m.user_id != id);
        tables.comments.retain(|_, c| c.user_id != id);
        true
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn save(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::QueryError(format!("duplicate email {}", user.email)));
        }

        let now = Utc::now();
        let id = tables.next_id();
        let user = User {
            id,
            email: user.email,
            password: user.password,
            role: user.role,
            created_at: now,
            modified_at: now,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: i64, encoded_password: &str) -> Result<(), DatabaseError> {
        if let Some(user) = self.tables.write().await.users.get_mut(&id) {
            user.password = encoded_password.to_string();
            user.modified_at = Utc::now();
        }
        Ok(())
    }

    async fn update_role(&self, id: i64, role: UserRole) -> Result<(), DatabaseError> {
        if let Some(user) = self.tables.write().await.users.get_mut(&id) {
            user.role = role;
            user.modified_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.todos.get(&id).map(|row| tables.todo(id, row)))
    }

    async fn save(&self, todo: NewTodo) -> Result<Todo, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.user(todo.user_id, "todo")?;

        let now = Utc::now();
        let id = tables.next_id();
        let row = TodoRow {
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user_id: Some(todo.user_id),
            created_at: now,
            modified_at: now,
        };
        let saved = tables.todo(id, &row);
        tables.todos.insert(id, row);
        Ok(saved)
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<TodoPage, DatabaseError> {
        let tables = self.tables.read().await;
        let mut todos: Vec<Todo> = tables.todos.iter().map(|(id, row)| tables.todo(*id, row)).collect();
        todos.sort_by(|a, b| b.modified_at.cmp(&a.modified_at).then(b.id.cmp(&a.id)));

        let total = todos.len() as i64;
        let todos = todos
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok(TodoPage { todos, total })
    }
}

#[async_trait]
impl ManagerRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Manager>, DatabaseError> {
        let tables = self.tables.read().await;
        tables.managers.get(&id).map(|row| tables.manager(id, row)).transpose()
    }

    async fn save(&self, manager: NewManager) -> Result<Manager, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.require_todo(manager.todo_id)?;
        tables.user(manager.user_id, "manager")?;

        let id = tables.next_id();
        let row = ManagerRow {
            user_id: manager.user_id,
            todo_id: manager.todo_id,
        };
        let saved = tables.manager(id, &row)?;
        tables.managers.insert(id, row);
        Ok(saved)
    }

    async fn delete(&self, manager: &Manager) -> Result<(), DatabaseError> {
        self.tables.write().await.managers.remove(&manager.id);
        Ok(())
    }

    async fn find_by_todo_id_with_user(&self, todo_id: i64) -> Result<Vec<Manager>, DatabaseError> {
        let tables = self.tables.read().await;
        tables
            .managers
            .iter()
            .filter(|(_, row)| row.todo_id == todo_id)
            .map(|(id, row)| tables.manager(*id, row))
            .collect()
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, DatabaseError> {
        let tables = self.tables.read().await;
        tables.comments.get(&id).map(|row| tables.comment(id, row)).transpose()
    }

    async fn save(&self, comment: NewComment) -> Result<Comment, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.require_todo(comment.todo_id)?;
        tables.user(comment.user_id, "comment")?;

        let now = Utc::now();
        let id = tables.next_id();
        let row = CommentRow {
            contents: comment.contents,
            user_id: comment.user_id,
            todo_id: comment.todo_id,
            created_at: now,
            modified_at: now,
        };
        let saved = tables.comment(id, &row)?;
        tables.comments.insert(id, row);
        Ok(saved)
    }

    async fn delete(&self, comment: &Comment) -> Result<(), DatabaseError> {
        self.tables.write().await.comments.remove(&comment.id);
        Ok(())
    }

    async fn find_by_todo_id_with_user(&self, todo_id: i64) -> Result<Vec<Comment>, DatabaseError> {
        let tables = self.tables.read().await;
        tables
            .comments
            .iter()
            .filter(|(_, row)| row.todo_id == todo_id)
            .map(|(id, row)| tables.comment(*id, row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn user(store: &MemoryStore, email: &str) -> User {
        UserRepository::save(
            store,
            NewUser { email: email.into(), password: "hash".into(), role: UserRole::User },
        )
        .await
        .unwrap()
    }

    async fn todo(store: &MemoryStore, owner: &User) -> Todo {
        TodoRepository::save(
            store,
            NewTodo { title: "t".into(), contents: "c".into(), weather: "Sunny".into(), user_id: owner.id },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn deleting_owner_leaves_todo_without_user() {
        let store = MemoryStore::new();
        let owner = user(&store, "owner@a.com").await;
        let todo = todo(&store, &owner).await;
        assert_eq!(todo.user.as_ref().map(|u| u.id), Some(owner.id));

        assert!(store.delete_user(owner.id).await);

        let reloaded = TodoRepository::find_by_id(&store, todo.id).await.unwrap().unwrap();
        assert!(reloaded.user.is_none());
    }

    #[tokio::test]
    async fn managers_list_in_insertion_order_and_allow_duplicates() {
        let store = MemoryStore::new();
        let owner = user(&store, "owner@a.com").await;
        let other = user(&store, "other@a.com").await;
        let todo = todo(&store, &owner).await;

        for _ in 0..2 {
            ManagerRepository::save(&store, NewManager { user_id: other.id, todo_id: todo.id })
                .await
                .unwrap();
        }

        let managers: Vec<Manager> = ManagerRepository::find_by_todo_id_with_user(&store, todo.id).await.unwrap();
        assert_eq!(managers.len(), 2);
        assert!(managers[0].id < managers[1].id);
        assert!(managers.iter().all(|m| m.user.email == "other@a.com"));
    }

    #[tokio::test]
    async fn manager_insert_requires_existing_rows() {
        let store = MemoryStore::new();
        let owner = user(&store, "owner@a.com").await;

        let err = ManagerRepository::save(&store, NewManager { user_id: owner.id, todo_id: 404 })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::DanglingReference(_)));
    }

    #[tokio::test]
    async fn todo_pages_are_newest_first() {
        let store = MemoryStore::new();
        let owner = user(&store, "owner@a.com").await;
        let first = todo(&store, &owner).await;
        let second = todo(&store, &owner).await;

        let page = store.find_page(0, 1).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.todos.len(), 1);
        assert_eq!(page.todos[0].id, second.id);

        let page = store.find_page(1, 1).await.unwrap();
        assert_eq!(page.todos[0].id, first.id);
    }
}
