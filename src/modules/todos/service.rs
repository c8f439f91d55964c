use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateTodoDto, Priority, Todo, UpdateTodoDto};

pub struct TodoService;

impl TodoService {
    /// Newest-first page of todos plus the total count for the envelope.
    #[instrument(skip(db))]
    pub async fn get_todos(
        db: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Todo>, i64), AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos")
        .map_err(AppError::database)?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
            .fetch_one(db)
            .await
            .context("Failed to count todos")
            .map_err(AppError::database)?;

        Ok((todos, total))
    }

    /// "May not exist" lookup; handlers use [`Self::get_todo`] for 404 mapping.
    #[instrument(skip(db))]
    pub async fn find_todo(db: &PgPool, id: Uuid) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as::<_, Todo>("SELECT * FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch todo by ID")
            .map_err(AppError::database)?;

        Ok(todo)
    }

    /// "Must exist" lookup: absence is a NotFound error.
    #[instrument(skip(db))]
    pub async fn get_todo(db: &PgPool, id: Uuid) -> Result<Todo, AppError> {
        Self::find_todo(db, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Todo with id {} not found", id)))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_todo(db: &PgPool, dto: CreateTodoDto) -> Result<Todo, AppError> {
        Self::ensure_owner_exists(db, dto.user_id).await?;

        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (title, description, priority, completed, pinned, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.priority)
        .bind(dto.completed.unwrap_or(false))
        .bind(dto.pinned.unwrap_or(false))
        .bind(dto.user_id)
        .fetch_one(db)
        .await
        .context("Failed to insert todo")
        .map_err(AppError::database)?;

        Ok(todo)
    }

    /// Partial update; the owner is only reassigned when `user_id` is provided.
    #[instrument(skip(db, dto))]
    pub async fn update_todo(
        db: &PgPool,
        id: Uuid,
        dto: UpdateTodoDto,
    ) -> Result<Todo, AppError> {
        if let Some(user_id) = dto.user_id {
            Self::ensure_owner_exists(db, user_id).await?;
        }

        let todo = sqlx::query_as::<_, Todo>(
            "UPDATE todos SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                completed = COALESCE($5, completed),
                pinned = COALESCE($6, pinned),
                user_id = COALESCE($7, user_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.priority)
        .bind(dto.completed)
        .bind(dto.pinned)
        .bind(dto.user_id)
        .fetch_optional(db)
        .await
        .context("Failed to update todo")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Todo with id {} not found", id)))?;

        Ok(todo)
    }

    #[instrument(skip(db))]
    pub async fn delete_todo(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let deleted: Option<(Uuid,)> =
            sqlx::query_as("DELETE FROM todos WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(db)
                .await
                .context("Failed to delete todo")
                .map_err(AppError::database)?;

        deleted
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Todo with id {} not found", id)))
    }

    #[instrument(skip(db))]
    pub async fn set_pinned(db: &PgPool, id: Uuid, pinned: bool) -> Result<Todo, AppError> {
        Self::set_flag(db, id, "pinned", pinned).await
    }

    #[instrument(skip(db))]
    pub async fn set_completed(db: &PgPool, id: Uuid, completed: bool) -> Result<Todo, AppError> {
        Self::set_flag(db, id, "completed", completed).await
    }

    // column is a fixed identifier chosen by the callers above
    async fn set_flag(db: &PgPool, id: Uuid, column: &str, value: bool) -> Result<Todo, AppError> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos SET {column} = $2, updated_at = NOW() WHERE id = $1 RETURNING *"
        ))
        .bind(id)
        .bind(value)
        .fetch_optional(db)
        .await
        .context("Failed to update todo flag")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Todo with id {} not found", id)))?;

        Ok(todo)
    }

    #[instrument(skip(db))]
    pub async fn get_pinned_todos(db: &PgPool) -> Result<Vec<Todo>, AppError> {
        Self::get_todos_by_pinned(db, true).await
    }

    #[instrument(skip(db))]
    pub async fn get_completed_todos(db: &PgPool) -> Result<Vec<Todo>, AppError> {
        Self::get_todos_by_completion(db, true).await
    }

    #[instrument(skip(db))]
    pub async fn get_todos_by_completion(
        db: &PgPool,
        completed: bool,
    ) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE completed = $1 ORDER BY created_at DESC",
        )
        .bind(completed)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos by completion")
        .map_err(AppError::database)?;
        Ok(todos)
    }

    #[instrument(skip(db))]
    pub async fn get_todos_by_pinned(db: &PgPool, pinned: bool) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE pinned = $1 ORDER BY created_at DESC",
        )
        .bind(pinned)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos by pinned status")
        .map_err(AppError::database)?;
        Ok(todos)
    }

    #[instrument(skip(db))]
    pub async fn get_todos_by_priority(
        db: &PgPool,
        priority: Priority,
    ) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE priority = $1 ORDER BY created_at DESC",
        )
        .bind(priority)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos by priority")
        .map_err(AppError::database)?;
        Ok(todos)
    }

    #[instrument(skip(db))]
    pub async fn get_todos_by_user(db: &PgPool, user_id: Uuid) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos by user")
        .map_err(AppError::database)?;
        Ok(todos)
    }

    #[instrument(skip(db))]
    pub async fn get_todos_by_user_and_priority(
        db: &PgPool,
        user_id: Uuid,
        priority: Priority,
    ) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE user_id = $1 AND priority = $2 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(priority)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos by user and priority")
        .map_err(AppError::database)?;
        Ok(todos)
    }

    #[instrument(skip(db))]
    pub async fn get_todos_by_user_and_completion(
        db: &PgPool,
        user_id: Uuid,
        completed: bool,
    ) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE user_id = $1 AND completed = $2 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(completed)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos by user and completion")
        .map_err(AppError::database)?;
        Ok(todos)
    }

    #[instrument(skip(db))]
    pub async fn get_todos_by_user_and_pinned(
        db: &PgPool,
        user_id: Uuid,
        pinned: bool,
    ) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE user_id = $1 AND pinned = $2 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(pinned)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos by user and pinned status")
        .map_err(AppError::database)?;
        Ok(todos)
    }

    #[instrument(skip(db))]
    pub async fn get_todos_by_priority_and_completion(
        db: &PgPool,
        priority: Priority,
        completed: bool,
    ) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE priority = $1 AND completed = $2 ORDER BY created_at DESC",
        )
        .bind(priority)
        .bind(completed)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos by priority and completion")
        .map_err(AppError::database)?;
        Ok(todos)
    }

    #[instrument(skip(db))]
    pub async fn get_todos_by_priority_and_pinned(
        db: &PgPool,
        priority: Priority,
        pinned: bool,
    ) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE priority = $1 AND pinned = $2 ORDER BY created_at DESC",
        )
        .bind(priority)
        .bind(pinned)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos by priority and pinned status")
        .map_err(AppError::database)?;
        Ok(todos)
    }

    #[instrument(skip(db))]
    pub async fn get_todos_by_user_priority_and_completion(
        db: &PgPool,
        user_id: Uuid,
        priority: Priority,
        completed: bool,
    ) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos
             WHERE user_id = $1 AND priority = $2 AND completed = $3
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(priority)
        .bind(completed)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos by user, priority and completion")
        .map_err(AppError::database)?;
        Ok(todos)
    }

    #[instrument(skip(db))]
    pub async fn get_todos_by_user_completion_and_pinned(
        db: &PgPool,
        user_id: Uuid,
        completed: bool,
        pinned: bool,
    ) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos
             WHERE user_id = $1 AND completed = $2 AND pinned = $3
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(completed)
        .bind(pinned)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos by user, completion and pinned status")
        .map_err(AppError::database)?;
        Ok(todos)
    }

    #[instrument(skip(db))]
    pub async fn get_todos_by_user_priority_and_pinned(
        db: &PgPool,
        user_id: Uuid,
        priority: Priority,
        pinned: bool,
    ) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos
             WHERE user_id = $1 AND priority = $2 AND pinned = $3
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(priority)
        .bind(pinned)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos by user, priority and pinned status")
        .map_err(AppError::database)?;
        Ok(todos)
    }

    async fn ensure_owner_exists(db: &PgPool, user_id: Uuid) -> Result<(), AppError> {
        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?;

        exists.map(|_| ()).ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!("User with id {} does not exist", user_id))
        })
    }
}
