use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserResponse;
use crate::database::models::Todo;

#[derive(Debug, Clone, Deserialize)]
pub struct TodoSaveRequest {
    pub title: String,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoSaveResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    /// Absent when the owning user no longer exists
    pub user: Option<UserResponse>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone(),
            contents: todo.contents.clone(),
            weather: todo.weather.clone(),
            user: todo.user.as_ref().map(UserResponse::from),
            created_at: todo.created_at,
            modified_at: todo.modified_at,
        }
    }
}

/// `?page=&size=`, page is 1-based
#[derive(Debug, Clone, Deserialize)]
pub struct TodoPageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for TodoPageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPageResponse {
    pub content: Vec<TodoResponse>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}
