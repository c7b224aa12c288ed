use std::sync::Arc;
use tracing::info;

use super::weather::WeatherProvider;
use super::TODO_NOT_FOUND;
use crate::api::{TodoPageQuery, TodoPageResponse, TodoResponse, TodoSaveRequest, TodoSaveResponse, UserResponse};
use crate::database::models::NewTodo;
use crate::database::TodoRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Clone)]
pub struct TodoService {
    todos: Arc<dyn TodoRepository>,
    weather: Arc<dyn WeatherProvider>,
}

impl TodoService {
    pub fn new(todos: Arc<dyn TodoRepository>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { todos, weather }
    }

    /// Creates a todo owned by the caller, stamped with today's weather
    pub async fn save_todo(&self, auth_user: &AuthUser, request: TodoSaveRequest) -> Result<TodoSaveResponse, ApiError> {
        let weather = self.weather.today().await?;

        let todo = self
            .todos
            .save(NewTodo {
                title: request.title,
                contents: request.contents,
                weather,
                user_id: auth_user.id,
            })
            .await?;

        info!(todo_id = todo.id, user_id = auth_user.id, "todo created");

        Ok(TodoSaveResponse {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user: UserResponse {
                id: auth_user.id,
                email: auth_user.email.clone(),
            },
        })
    }

    pub async fn get_todos(&self, query: TodoPageQuery) -> Result<TodoPageResponse, ApiError> {
        if query.page < 1 || query.size < 1 {
            return Err(ApiError::invalid_request("page and size must be at least 1"));
        }

        let offset = (query.page - 1).saturating_mul(query.size);
        let page = self.todos.find_page(offset, query.size).await?;
        let total_pages = page.total / query.size + i64::from(page.total % query.size != 0);

        Ok(TodoPageResponse {
            content: page.todos.iter().map(TodoResponse::from).collect(),
            page: query.page,
            size: query.size,
            total_elements: page.total,
            total_pages,
        })
    }

    pub async fn get_todo(&self, todo_id: i64) -> Result<TodoResponse, ApiError> {
        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| ApiError::invalid_request(TODO_NOT_FOUND))?;

        Ok(TodoResponse::from(&todo))
    }
}
