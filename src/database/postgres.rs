use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::database::models::{Comment, Manager, NewComment, NewManager, NewTodo, NewUser, Todo, User};
use crate::database::repository::{CommentRepository, ManagerRepository, TodoPage, TodoRepository, UserRepository};
use crate::database::DatabaseError;
use crate::types::UserRole;

/// User columns under the `u` alias, prefixed so they never clash with the joined table
const USER_COLUMNS: &str = "u.id AS u_id, u.email AS u_email, u.password AS u_password, \
     u.user_role AS u_role, u.created_at AS u_created_at, u.modified_at AS u_modified_at";

fn parse_role(raw: &str) -> Result<UserRole, DatabaseError> {
    raw.parse()
        .map_err(|_| DatabaseError::QueryError(format!("unknown user_role '{}'", raw)))
}

/// Reads the `u_*` columns; `None` when a left join found no user
fn joined_user(row: &PgRow) -> Result<Option<User>, DatabaseError> {
    let id: Option<i64> = row.try_get("u_id")?;
    let Some(id) = id else {
        return Ok(None);
    };
    let role: String = row.try_get("u_role")?;

    Ok(Some(User {
        id,
        email: row.try_get("u_email")?,
        password: row.try_get("u_password")?,
        role: parse_role(&role)?,
        created_at: row.try_get("u_created_at")?,
        modified_at: row.try_get("u_modified_at")?,
    }))
}

fn required_user(row: &PgRow, owner: &str) -> Result<User, DatabaseError> {
    joined_user(row)?.ok_or_else(|| DatabaseError::DanglingReference(format!("{} without user", owner)))
}

fn todo_from_row(row: &PgRow) -> Result<Todo, DatabaseError> {
    Ok(Todo {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        contents: row.try_get("contents")?,
        weather: row.try_get("weather")?,
        user: joined_user(row)?,
        created_at: row.try_get("created_at")?,
        modified_at: row.try_get("modified_at")?,
    })
}

fn manager_from_row(row: &PgRow) -> Result<Manager, DatabaseError> {
    Ok(Manager {
        id: row.try_get("id")?,
        user: required_user(row, "manager")?,
        todo_id: row.try_get("todo_id")?,
    })
}

fn comment_from_row(row: &PgRow) -> Result<Comment, DatabaseError> {
    Ok(Comment {
        id: row.try_get("id")?,
        contents: row.try_get("contents")?,
        user: required_user(row, "comment")?,
        todo_id: row.try_get("todo_id")?,
        created_at: row.try_get("created_at")?,
        modified_at: row.try_get("modified_at")?,
    })
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users u WHERE u.id = $1", USER_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        match row {
            Some(row) => joined_user(&row),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users u WHERE u.email = $1", USER_COLUMNS);
        let row = sqlx::query(&sql).bind(email).fetch_optional(&self.pool).await?;
        match row {
            Some(row) => joined_user(&row),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DatabaseError> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn save(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "WITH u AS (INSERT INTO users (email, password, user_role) VALUES ($1, $2, $3) RETURNING *) \
             SELECT {} FROM u",
            USER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await?;
        required_user(&row, "inserted row")
    }

    async fn update_password(&self, id: i64, encoded_password: &str) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE users SET password = $2, modified_at = now() WHERE id = $1")
            .bind(id)
            .bind(encoded_password)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_role(&self, id: i64, role: UserRole) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE users SET user_role = $2, modified_at = now() WHERE id = $1")
            .bind(id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, DatabaseError> {
        let sql = format!(
            "SELECT t.id, t.title, t.contents, t.weather, t.created_at, t.modified_at, {} \
             FROM todos t LEFT JOIN users u ON u.id = t.user_id WHERE t.id = $1",
            USER_COLUMNS
        );
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(todo_from_row).transpose()
    }

    async fn save(&self, todo: NewTodo) -> Result<Todo, DatabaseError> {
        let sql = format!(
            "WITH t AS (INSERT INTO todos (title, contents, weather, user_id) VALUES ($1, $2, $3, $4) RETURNING *) \
             SELECT t.id, t.title, t.contents, t.weather, t.created_at, t.modified_at, {} \
             FROM t LEFT JOIN users u ON u.id = t.user_id",
            USER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&todo.title)
            .bind(&todo.contents)
            .bind(&todo.weather)
            .bind(todo.user_id)
            .fetch_one(&self.pool)
            .await?;
        todo_from_row(&row)
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<TodoPage, DatabaseError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT t.id, t.title, t.contents, t.weather, t.created_at, t.modified_at, {} \
             FROM todos t LEFT JOIN users u ON u.id = t.user_id \
             ORDER BY t.modified_at DESC, t.id DESC LIMIT $1 OFFSET $2",
            USER_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        let todos = rows.iter().map(todo_from_row).collect::<Result<Vec<_>, _>>()?;

        Ok(TodoPage { todos, total })
    }
}

#[derive(Clone)]
pub struct PgManagerRepository {
    pool: PgPool,
}

impl PgManagerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ManagerRepository for PgManagerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Manager>, DatabaseError> {
        let sql = format!(
            "SELECT m.id, m.todo_id, {} FROM managers m JOIN users u ON u.id = m.user_id WHERE m.id = $1",
            USER_COLUMNS
        );
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(manager_from_row).transpose()
    }

    async fn save(&self, manager: NewManager) -> Result<Manager, DatabaseError> {
        let sql = format!(
            "WITH m AS (INSERT INTO managers (user_id, todo_id) VALUES ($1, $2) RETURNING *) \
             SELECT m.id, m.todo_id, {} FROM m JOIN users u ON u.id = m.user_id",
            USER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(manager.user_id)
            .bind(manager.todo_id)
            .fetch_one(&self.pool)
            .await?;
        manager_from_row(&row)
    }

    async fn delete(&self, manager: &Manager) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM managers WHERE id = $1")
            .bind(manager.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_todo_id_with_user(&self, todo_id: i64) -> Result<Vec<Manager>, DatabaseError> {
        let sql = format!(
            "SELECT m.id, m.todo_id, {} FROM managers m JOIN users u ON u.id = m.user_id \
             WHERE m.todo_id = $1 ORDER BY m.id",
            USER_COLUMNS
        );
        let rows = sqlx::query(&sql).bind(todo_id).fetch_all(&self.pool).await?;
        rows.iter().map(manager_from_row).collect()
    }
}

#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, DatabaseError> {
        let sql = format!(
            "SELECT c.id, c.contents, c.todo_id, c.created_at, c.modified_at, {} \
             FROM comments c JOIN users u ON u.id = c.user_id WHERE c.id = $1",
            USER_COLUMNS
        );
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(comment_from_row).transpose()
    }

    async fn save(&self, comment: NewComment) -> Result<Comment, DatabaseError> {
        let sql = format!(
            "WITH c AS (INSERT INTO comments (contents, user_id, todo_id) VALUES ($1, $2, $3) RETURNING *) \
             SELECT c.id, c.contents, c.todo_id, c.created_at, c.modified_at, {} \
             FROM c JOIN users u ON u.id = c.user_id",
            USER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&comment.contents)
            .bind(comment.user_id)
            .bind(comment.todo_id)
            .fetch_one(&self.pool)
            .await?;
        comment_from_row(&row)
    }

    async fn delete(&self, comment: &Comment) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_todo_id_with_user(&self, todo_id: i64) -> Result<Vec<Comment>, DatabaseError> {
        let sql = format!(
            "SELECT c.id, c.contents, c.todo_id, c.created_at, c.modified_at, {} \
             FROM comments c JOIN users u ON u.id = c.user_id \
             WHERE c.todo_id = $1 ORDER BY c.id",
            USER_COLUMNS
        );
        let rows = sqlx::query(&sql).bind(todo_id).fetch_all(&self.pool).await?;
        rows.iter().map(comment_from_row).collect()
    }
}
