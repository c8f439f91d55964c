use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::todos::model::Todo;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{
    CreateUserDto, PUBLIC_USER_COLUMNS, SortOrder, TodoSortBy, UpdateUserDto, User, UserWithTodos,
};

pub struct UserService;

impl UserService {
    #[instrument(skip(db, dto))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!(
                "User with this email already exists"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (first_name, last_name, email, password, bio, avatar_url, birthday)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PUBLIC_USER_COLUMNS}"
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.bio)
        .bind(&dto.avatar_url)
        .bind(dto.birthday)
        .fetch_one(db)
        .await
        .context("Failed to insert user")
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {PUBLIC_USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch users")
        .map_err(AppError::database)?;

        Ok(users)
    }

    /// "May not exist" lookup. HTTP handlers use [`Self::get_user`] instead
    /// so absence maps to an explicit 404.
    #[instrument(skip(db))]
    pub async fn find_user(db: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {PUBLIC_USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by ID")
        .map_err(AppError::database)?;

        Ok(user)
    }

    /// "Must exist" lookup: absence is a NotFound error.
    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        Self::find_user(db, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User with id {} not found", id)))
    }

    #[instrument(skip(db))]
    pub async fn find_user_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {PUBLIC_USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user_by_email(db: &PgPool, email: &str) -> Result<User, AppError> {
        Self::find_user_by_email(db, email).await?.ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("User with email {} not found", email))
        })
    }

    /// Partial update: only provided fields change.
    #[instrument(skip(db, dto))]
    pub async fn update_user(
        db: &PgPool,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                bio = COALESCE($4, bio),
                avatar_url = COALESCE($5, avatar_url),
                birthday = COALESCE($6, birthday),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {PUBLIC_USER_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.bio)
        .bind(&dto.avatar_url)
        .bind(dto.birthday)
        .fetch_optional(db)
        .await
        .context("Failed to update user")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User with id {} not found", id)))?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let deleted: Option<(Uuid,)> = sqlx::query_as("DELETE FROM users WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to delete user")
            .map_err(AppError::database)?;

        deleted
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User with id {} not found", id)))
    }

    #[instrument(skip(db))]
    pub async fn get_user_todos(db: &PgPool, id: Uuid) -> Result<UserWithTodos, AppError> {
        let user = Self::get_user(db, id).await?;

        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(id)
        .fetch_all(db)
        .await
        .context("Failed to fetch user todos")
        .map_err(AppError::database)?;

        Ok(UserWithTodos { user, todos })
    }

    #[instrument(skip(db))]
    pub async fn get_user_todos_sorted(
        db: &PgPool,
        id: Uuid,
        sort_by: TodoSortBy,
        sort_order: SortOrder,
    ) -> Result<UserWithTodos, AppError> {
        let user = Self::get_user(db, id).await?;

        // sort_by/sort_order come from fixed enums, never raw input
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT * FROM todos WHERE user_id = $1 ORDER BY {} {}",
            sort_by.column(),
            sort_order.keyword()
        ))
        .bind(id)
        .fetch_all(db)
        .await
        .context("Failed to fetch sorted user todos")
        .map_err(AppError::database)?;

        Ok(UserWithTodos { user, todos })
    }

    #[instrument(skip(db))]
    pub async fn get_user_todos_by_completion(
        db: &PgPool,
        id: Uuid,
        completed: bool,
    ) -> Result<UserWithTodos, AppError> {
        let user = Self::get_user(db, id).await?;

        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE user_id = $1 AND completed = $2 ORDER BY created_at DESC",
        )
        .bind(id)
        .bind(completed)
        .fetch_all(db)
        .await
        .context("Failed to fetch user todos by completion")
        .map_err(AppError::database)?;

        Ok(UserWithTodos { user, todos })
    }
}
