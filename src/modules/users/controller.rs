use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CompletionQuery, CreateUserDto, SortQuery, UpdateUserDto, User, UserWithTodos,
};
use super::service::UserService;

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::get_users(&state.db).await?;
    Ok(Json(users))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = UserService::create_user(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Fetch a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(user))
}

/// Fetch a user by email
#[utoipa::path(
    get,
    path = "/api/users/email/{email}",
    params(("email" = String, Path, description = "Email address")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user_by_email(&state.db, &email).await?;
    Ok(Json(user))
}

/// Partially update a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::update_user(&state.db, id, dto).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    UserService::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A user's todos
#[utoipa::path(
    get,
    path = "/api/users/{id}/todos",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User with todos", body = UserWithTodos),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user_todos(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserWithTodos>, AppError> {
    let result = UserService::get_user_todos(&state.db, id).await?;
    Ok(Json(result))
}

/// A user's todos, sorted
#[utoipa::path(
    get,
    path = "/api/users/{id}/todos/sorted",
    params(("id" = Uuid, Path, description = "User ID"), SortQuery),
    responses(
        (status = 200, description = "User with sorted todos", body = UserWithTodos),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user_todos_sorted(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SortQuery>,
) -> Result<Json<UserWithTodos>, AppError> {
    let result =
        UserService::get_user_todos_sorted(&state.db, id, query.sort_by, query.sort_order).await?;
    Ok(Json(result))
}

/// A user's todos, filtered by completion status
#[utoipa::path(
    get,
    path = "/api/users/{id}/todos/completion",
    params(("id" = Uuid, Path, description = "User ID"), CompletionQuery),
    responses(
        (status = 200, description = "User with filtered todos", body = UserWithTodos),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user_todos_by_completion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CompletionQuery>,
) -> Result<Json<UserWithTodos>, AppError> {
    let result =
        UserService::get_user_todos_by_completion(&state.db, id, query.completed).await?;
    Ok(Json(result))
}
