use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    /// Owner resolved through a left join; `None` means the owner row is gone
    pub user: Option<User>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: i64,
}
