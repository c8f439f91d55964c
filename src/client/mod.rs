//! HTTP client for the Taskhive API.
//!
//! Thin typed wrapper over `reqwest` used by the terminal client. Every
//! method maps to one backend route and returns the same models the server
//! serializes. Non-2xx responses become [`ClientError`] values, with 401
//! split out so callers can drop a stale token and re-prompt for login.

pub mod token_store;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::modules::auth::model::{AuthResponse, LoginRequest, RegisterRequestDto};
use crate::modules::todos::model::{
    CreateTodoDto, PaginatedTodosResponse, Priority, Todo, UpdateTodoDto,
};
use crate::modules::users::model::{
    CreateUserDto, SortOrder, TodoSortBy, UpdateUserDto, User, UserWithTodos,
};

pub use token_store::TokenStore;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// API client holding the base URL and an optional bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Base URL from `API_BASE_URL`, falling back to the local dev server.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Self::handle(response).await
    }

    async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        Err(Self::error_from(status, response).await)
    }

    async fn handle_empty(response: reqwest::Response) -> Result<(), ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_from(status, response).await)
    }

    async fn error_from(status: StatusCode, response: reqwest::Response) -> ClientError {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        if status == StatusCode::UNAUTHORIZED {
            ClientError::Unauthorized(message)
        } else {
            ClientError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }

    // Auth

    pub async fn register(&self, dto: &RegisterRequestDto) -> Result<AuthResponse, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/register")
            .json(dto)
            .send()
            .await?;
        Self::handle(response).await
    }

    pub async fn login(&self, dto: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/login")
            .json(dto)
            .send()
            .await?;
        Self::handle(response).await
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.get_json("/auth/users/me").await
    }

    // Todos

    pub async fn list_todos(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<PaginatedTodosResponse, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/todos")
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        Self::handle(response).await
    }

    pub async fn get_todo(&self, id: Uuid) -> Result<Todo, ClientError> {
        self.get_json(&format!("/todos/{id}")).await
    }

    pub async fn create_todo(&self, dto: &CreateTodoDto) -> Result<Todo, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/todos")
            .json(dto)
            .send()
            .await?;
        Self::handle(response).await
    }

    pub async fn update_todo(&self, id: Uuid, dto: &UpdateTodoDto) -> Result<Todo, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/todos/{id}"))
            .json(dto)
            .send()
            .await?;
        Self::handle(response).await
    }

    pub async fn delete_todo(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/todos/{id}"))
            .send()
            .await?;
        Self::handle_empty(response).await
    }

    pub async fn pin_todo(&self, id: Uuid) -> Result<Todo, ClientError> {
        self.put_toggle(id, "pin").await
    }

    pub async fn unpin_todo(&self, id: Uuid) -> Result<Todo, ClientError> {
        self.put_toggle(id, "unpin").await
    }

    pub async fn complete_todo(&self, id: Uuid) -> Result<Todo, ClientError> {
        self.put_toggle(id, "complete").await
    }

    pub async fn uncomplete_todo(&self, id: Uuid) -> Result<Todo, ClientError> {
        self.put_toggle(id, "uncomplete").await
    }

    async fn put_toggle(&self, id: Uuid, action: &str) -> Result<Todo, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/todos/{id}/{action}"))
            .send()
            .await?;
        Self::handle(response).await
    }

    // Todo filter routes

    pub async fn pinned_todos(&self) -> Result<Vec<Todo>, ClientError> {
        self.get_json("/todos/pinned").await
    }

    pub async fn completed_todos(&self) -> Result<Vec<Todo>, ClientError> {
        self.get_json("/todos/completed").await
    }

    pub async fn todos_by_completion(&self, completed: bool) -> Result<Vec<Todo>, ClientError> {
        self.get_json(&format!("/todos/completion/{completed}")).await
    }

    pub async fn todos_by_pinned(&self, pinned: bool) -> Result<Vec<Todo>, ClientError> {
        self.get_json(&format!("/todos/pinned/{pinned}")).await
    }

    pub async fn todos_by_priority(&self, priority: Priority) -> Result<Vec<Todo>, ClientError> {
        self.get_json(&format!("/todos/priority/{}", priority_segment(priority)))
            .await
    }

    pub async fn todos_by_user(&self, user_id: Uuid) -> Result<Vec<Todo>, ClientError> {
        self.get_json(&format!("/todos/user/{user_id}")).await
    }

    pub async fn todos_by_user_and_priority(
        &self,
        user_id: Uuid,
        priority: Priority,
    ) -> Result<Vec<Todo>, ClientError> {
        self.get_json(&format!(
            "/todos/user/{user_id}/priority/{}",
            priority_segment(priority)
        ))
        .await
    }

    pub async fn todos_by_user_and_completion(
        &self,
        user_id: Uuid,
        completed: bool,
    ) -> Result<Vec<Todo>, ClientError> {
        self.get_json(&format!("/todos/user/{user_id}/completion/{completed}"))
            .await
    }

    pub async fn todos_by_user_and_pinned(
        &self,
        user_id: Uuid,
        pinned: bool,
    ) -> Result<Vec<Todo>, ClientError> {
        self.get_json(&format!("/todos/user/{user_id}/pinned/{pinned}"))
            .await
    }

    pub async fn todos_by_priority_and_completion(
        &self,
        priority: Priority,
        completed: bool,
    ) -> Result<Vec<Todo>, ClientError> {
        self.get_json(&format!(
            "/todos/priority/{}/completion/{completed}",
            priority_segment(priority)
        ))
        .await
    }

    pub async fn todos_by_priority_and_pinned(
        &self,
        priority: Priority,
        pinned: bool,
    ) -> Result<Vec<Todo>, ClientError> {
        self.get_json(&format!(
            "/todos/priority/{}/pinned/{pinned}",
            priority_segment(priority)
        ))
        .await
    }

    pub async fn todos_by_user_priority_and_completion(
        &self,
        user_id: Uuid,
        priority: Priority,
        completed: bool,
    ) -> Result<Vec<Todo>, ClientError> {
        self.get_json(&format!(
            "/todos/user/{user_id}/priority/{}/completion/{completed}",
            priority_segment(priority)
        ))
        .await
    }

    pub async fn todos_by_user_priority_and_pinned(
        &self,
        user_id: Uuid,
        priority: Priority,
        pinned: bool,
    ) -> Result<Vec<Todo>, ClientError> {
        self.get_json(&format!(
            "/todos/user/{user_id}/priority/{}/pinned/{pinned}",
            priority_segment(priority)
        ))
        .await
    }

    pub async fn todos_by_user_completion_and_pinned(
        &self,
        user_id: Uuid,
        completed: bool,
        pinned: bool,
    ) -> Result<Vec<Todo>, ClientError> {
        self.get_json(&format!(
            "/todos/user/{user_id}/completion/{completed}/pinned/{pinned}"
        ))
        .await
    }

    // Users

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.get_json("/users").await
    }

    pub async fn create_user(&self, dto: &CreateUserDto) -> Result<User, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/users")
            .json(dto)
            .send()
            .await?;
        Self::handle(response).await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, ClientError> {
        self.get_json(&format!("/users/{id}")).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, ClientError> {
        self.get_json(&format!("/users/email/{email}")).await
    }

    pub async fn update_user(&self, id: Uuid, dto: &UpdateUserDto) -> Result<User, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/users/{id}"))
            .json(dto)
            .send()
            .await?;
        Self::handle(response).await
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/users/{id}"))
            .send()
            .await?;
        Self::handle_empty(response).await
    }

    pub async fn user_todos(&self, id: Uuid) -> Result<UserWithTodos, ClientError> {
        self.get_json(&format!("/users/{id}/todos")).await
    }

    pub async fn user_todos_sorted(
        &self,
        id: Uuid,
        sort_by: TodoSortBy,
        sort_order: SortOrder,
    ) -> Result<UserWithTodos, ClientError> {
        self.get_json(&format!(
            "/users/{id}/todos/sorted?sort_by={}&sort_order={}",
            sort_by.query_value(),
            sort_order.query_value()
        ))
        .await
    }

    pub async fn user_todos_by_completion(
        &self,
        id: Uuid,
        completed: bool,
    ) -> Result<UserWithTodos, ClientError> {
        self.get_json(&format!("/users/{id}/todos/completion?completed={completed}"))
            .await
    }
}

fn priority_segment(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "LOW",
        Priority::Medium => "MEDIUM",
        Priority::High => "HIGH",
    }
}
