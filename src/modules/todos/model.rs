use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::PaginationMeta;

/// Todo priority. Stored as the Postgres `priority` enum; serialized with
/// the original wire values (`LOW`, `MEDIUM`, `HIGH`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "priority", rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Stays absent when the creator omitted it; never coerced to a default.
    pub priority: Option<Priority>,
    pub completed: bool,
    pub pinned: bool,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTodoDto {
    #[validate(length(min = 1, max = 255, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub pinned: Option<bool>,
    pub user_id: Uuid,
}

/// Partial update: only provided fields change. The owner reference is
/// only touched when `user_id` is explicitly present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTodoDto {
    #[validate(length(min = 1, max = 255, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub pinned: Option<bool>,
    pub user_id: Option<Uuid>,
}

/// Pagination envelope for the todo list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedTodosResponse {
    pub data: Vec<Todo>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_priority_wire_format() {
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), r#""LOW""#);
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), r#""HIGH""#);
        let p: Priority = serde_json::from_str(r#""MEDIUM""#).unwrap();
        assert_eq!(p, Priority::Medium);
    }

    #[test]
    fn test_priority_rejects_unknown_value() {
        assert!(serde_json::from_str::<Priority>(r#""URGENT""#).is_err());
    }

    #[test]
    fn test_create_dto_priority_defaults_to_absent() {
        let json = format!(
            r#"{{"title":"Write code","user_id":"{}"}}"#,
            Uuid::new_v4()
        );
        let dto: CreateTodoDto = serde_json::from_str(&json).unwrap();
        assert!(dto.priority.is_none());
        assert!(dto.completed.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_empty_title() {
        let json = format!(r#"{{"title":"","user_id":"{}"}}"#, Uuid::new_v4());
        let dto: CreateTodoDto = serde_json::from_str(&json).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_dto_single_field() {
        let dto: UpdateTodoDto = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert_eq!(dto.completed, Some(true));
        assert!(dto.title.is_none());
        assert!(dto.priority.is_none());
        assert!(dto.user_id.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_todo_round_trips_optional_fields() {
        let todo = Todo {
            id: Uuid::new_v4(),
            title: "Review PR".to_string(),
            description: None,
            priority: None,
            completed: false,
            pinned: false,
            user_id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let serialized = serde_json::to_string(&todo).unwrap();
        assert!(serialized.contains(r#""priority":null"#));
        let back: Todo = serde_json::from_str(&serialized).unwrap();
        assert_eq!(back, todo);
    }
}
