//! User entity and DTOs.
//!
//! [`User`] is the public projection served in responses; the password
//! hash is selected only inside the auth service and never serialized.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::modules::todos::model::Todo;

/// Column list for the public projection. Every query returning a [`User`]
/// selects exactly these, keeping the password hash out of result rows.
pub const PUBLIC_USER_COLUMNS: &str = "id, first_name, last_name, email, bio, avatar_url, \
     birthday, is_admin, is_active, created_at, updated_at";

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub birthday: Option<chrono::NaiveDate>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(length(min = 6, max = 100, message = "password must be 6-100 characters"))]
    pub password: String,
    #[validate(length(max = 500, message = "bio must be at most 500 characters"))]
    pub bio: Option<String>,
    #[validate(url(message = "avatar_url must be a valid URL"))]
    pub avatar_url: Option<String>,
    pub birthday: Option<chrono::NaiveDate>,
}

/// Partial update: absent fields leave the current value unchanged. An
/// explicitly provided empty string is a value and fails its length rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: Option<String>,
    #[validate(length(max = 500, message = "bio must be at most 500 characters"))]
    pub bio: Option<String>,
    #[validate(url(message = "avatar_url must be a valid URL"))]
    pub avatar_url: Option<String>,
    pub birthday: Option<chrono::NaiveDate>,
}

/// Sort field for a user's todo list. Maps to a fixed column name, so the
/// ORDER BY clause is never built from raw user input.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TodoSortBy {
    Priority,
    #[default]
    Date,
    Completed,
}

impl TodoSortBy {
    pub fn column(self) -> &'static str {
        match self {
            TodoSortBy::Priority => "priority",
            TodoSortBy::Date => "created_at",
            TodoSortBy::Completed => "completed",
        }
    }

    /// The value this variant deserializes from in query strings.
    pub fn query_value(self) -> &'static str {
        match self {
            TodoSortBy::Priority => "priority",
            TodoSortBy::Date => "date",
            TodoSortBy::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// The value this variant deserializes from in query strings.
    pub fn query_value(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SortQuery {
    #[serde(default)]
    pub sort_by: TodoSortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CompletionQuery {
    #[serde(default)]
    pub completed: bool,
}

/// A user together with (a subset of) their todos.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserWithTodos {
    #[serde(flatten)]
    pub user: User,
    pub todos: Vec<Todo>,
}
