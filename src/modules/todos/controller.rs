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
use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::validator::ValidatedJson;

use super::model::{CreateTodoDto, PaginatedTodosResponse, Priority, Todo, UpdateTodoDto};
use super::service::TodoService;

/// Paginated todo list, newest first
#[utoipa::path(
    get,
    path = "/api/todos",
    params(PaginationParams),
    responses(
        (status = 200, description = "A page of todos", body = PaginatedTodosResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedTodosResponse>, AppError> {
    let (todos, total) =
        TodoService::get_todos(&state.db, params.limit(), params.offset()).await?;

    Ok(Json(PaginatedTodosResponse {
        data: todos,
        meta: PaginationMeta::new(params.page(), params.limit(), total),
    }))
}

/// Fetch a todo by id
#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo", body = Todo),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, AppError> {
    let todo = TodoService::get_todo(&state.db, id).await?;
    Ok(Json(todo))
}

/// Create a todo
#[utoipa::path(
    post,
    path = "/api/todos",
    request_body = CreateTodoDto,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Owner does not exist", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state, dto))]
pub async fn create_todo(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTodoDto>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let todo = TodoService::create_todo(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Partially update a todo
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo ID")),
    request_body = UpdateTodoDto,
    responses(
        (status = 200, description = "Updated todo", body = Todo),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state, dto))]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTodoDto>,
) -> Result<Json<Todo>, AppError> {
    let todo = TodoService::update_todo(&state.db, id, dto).await?;
    Ok(Json(todo))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo ID")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    TodoService::delete_todo(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pin a todo
#[utoipa::path(
    put,
    path = "/api/todos/{id}/pin",
    params(("id" = Uuid, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Pinned todo", body = Todo),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn pin_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, AppError> {
    let todo = TodoService::set_pinned(&state.db, id, true).await?;
    Ok(Json(todo))
}

/// Unpin a todo
#[utoipa::path(
    put,
    path = "/api/todos/{id}/unpin",
    params(("id" = Uuid, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Unpinned todo", body = Todo),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn unpin_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, AppError> {
    let todo = TodoService::set_pinned(&state.db, id, false).await?;
    Ok(Json(todo))
}

/// Mark a todo completed
#[utoipa::path(
    put,
    path = "/api/todos/{id}/complete",
    params(("id" = Uuid, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Completed todo", body = Todo),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn complete_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, AppError> {
    let todo = TodoService::set_completed(&state.db, id, true).await?;
    Ok(Json(todo))
}

/// Mark a todo not completed
#[utoipa::path(
    put,
    path = "/api/todos/{id}/uncomplete",
    params(("id" = Uuid, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Uncompleted todo", body = Todo),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn uncomplete_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, AppError> {
    let todo = TodoService::set_completed(&state.db, id, false).await?;
    Ok(Json(todo))
}

/// All pinned todos
#[utoipa::path(
    get,
    path = "/api/todos/pinned",
    responses((status = 200, description = "Pinned todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_pinned_todos(
    State(state): State<AppState>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = TodoService::get_pinned_todos(&state.db).await?;
    Ok(Json(todos))
}

/// All completed todos
#[utoipa::path(
    get,
    path = "/api/todos/completed",
    responses((status = 200, description = "Completed todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_completed_todos(
    State(state): State<AppState>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = TodoService::get_completed_todos(&state.db).await?;
    Ok(Json(todos))
}

/// Todos filtered by completion status
#[utoipa::path(
    get,
    path = "/api/todos/completion/{completed}",
    params(("completed" = bool, Path, description = "Completion flag")),
    responses((status = 200, description = "Filtered todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos_by_completion(
    State(state): State<AppState>,
    Path(completed): Path<bool>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = TodoService::get_todos_by_completion(&state.db, completed).await?;
    Ok(Json(todos))
}

/// Todos filtered by pinned status
#[utoipa::path(
    get,
    path = "/api/todos/pinned/{pinned}",
    params(("pinned" = bool, Path, description = "Pinned flag")),
    responses((status = 200, description = "Filtered todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos_by_pinned(
    State(state): State<AppState>,
    Path(pinned): Path<bool>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = TodoService::get_todos_by_pinned(&state.db, pinned).await?;
    Ok(Json(todos))
}

/// Todos filtered by priority
#[utoipa::path(
    get,
    path = "/api/todos/priority/{priority}",
    params(("priority" = Priority, Path, description = "Priority (LOW, MEDIUM, HIGH)")),
    responses((status = 200, description = "Filtered todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos_by_priority(
    State(state): State<AppState>,
    Path(priority): Path<Priority>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = TodoService::get_todos_by_priority(&state.db, priority).await?;
    Ok(Json(todos))
}

/// Todos owned by a user
#[utoipa::path(
    get,
    path = "/api/todos/user/{user_id}",
    params(("user_id" = Uuid, Path, description = "Owner user ID")),
    responses((status = 200, description = "The user's todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = TodoService::get_todos_by_user(&state.db, user_id).await?;
    Ok(Json(todos))
}

/// Todos owned by a user, filtered by priority
#[utoipa::path(
    get,
    path = "/api/todos/user/{user_id}/priority/{priority}",
    params(
        ("user_id" = Uuid, Path, description = "Owner user ID"),
        ("priority" = Priority, Path, description = "Priority (LOW, MEDIUM, HIGH)")
    ),
    responses((status = 200, description = "Filtered todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos_by_user_and_priority(
    State(state): State<AppState>,
    Path((user_id, priority)): Path<(Uuid, Priority)>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos =
        TodoService::get_todos_by_user_and_priority(&state.db, user_id, priority).await?;
    Ok(Json(todos))
}

/// Todos owned by a user, filtered by completion status
#[utoipa::path(
    get,
    path = "/api/todos/user/{user_id}/completion/{completed}",
    params(
        ("user_id" = Uuid, Path, description = "Owner user ID"),
        ("completed" = bool, Path, description = "Completion flag")
    ),
    responses((status = 200, description = "Filtered todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos_by_user_and_completion(
    State(state): State<AppState>,
    Path((user_id, completed)): Path<(Uuid, bool)>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos =
        TodoService::get_todos_by_user_and_completion(&state.db, user_id, completed).await?;
    Ok(Json(todos))
}

/// Todos owned by a user, filtered by pinned status
#[utoipa::path(
    get,
    path = "/api/todos/user/{user_id}/pinned/{pinned}",
    params(
        ("user_id" = Uuid, Path, description = "Owner user ID"),
        ("pinned" = bool, Path, description = "Pinned flag")
    ),
    responses((status = 200, description = "Filtered todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos_by_user_and_pinned(
    State(state): State<AppState>,
    Path((user_id, pinned)): Path<(Uuid, bool)>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = TodoService::get_todos_by_user_and_pinned(&state.db, user_id, pinned).await?;
    Ok(Json(todos))
}

/// Todos filtered by priority and completion status
#[utoipa::path(
    get,
    path = "/api/todos/priority/{priority}/completion/{completed}",
    params(
        ("priority" = Priority, Path, description = "Priority (LOW, MEDIUM, HIGH)"),
        ("completed" = bool, Path, description = "Completion flag")
    ),
    responses((status = 200, description = "Filtered todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos_by_priority_and_completion(
    State(state): State<AppState>,
    Path((priority, completed)): Path<(Priority, bool)>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos =
        TodoService::get_todos_by_priority_and_completion(&state.db, priority, completed).await?;
    Ok(Json(todos))
}

/// Todos filtered by priority and pinned status
#[utoipa::path(
    get,
    path = "/api/todos/priority/{priority}/pinned/{pinned}",
    params(
        ("priority" = Priority, Path, description = "Priority (LOW, MEDIUM, HIGH)"),
        ("pinned" = bool, Path, description = "Pinned flag")
    ),
    responses((status = 200, description = "Filtered todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos_by_priority_and_pinned(
    State(state): State<AppState>,
    Path((priority, pinned)): Path<(Priority, bool)>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos =
        TodoService::get_todos_by_priority_and_pinned(&state.db, priority, pinned).await?;
    Ok(Json(todos))
}

/// Todos owned by a user, filtered by completion and pinned status
#[utoipa::path(
    get,
    path = "/api/todos/user/{user_id}/completion/{completed}/pinned/{pinned}",
    params(
        ("user_id" = Uuid, Path, description = "Owner user ID"),
        ("completed" = bool, Path, description = "Completion flag"),
        ("pinned" = bool, Path, description = "Pinned flag")
    ),
    responses((status = 200, description = "Filtered todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos_by_user_completion_and_pinned(
    State(state): State<AppState>,
    Path((user_id, completed, pinned)): Path<(Uuid, bool, bool)>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = TodoService::get_todos_by_user_completion_and_pinned(
        &state.db, user_id, completed, pinned,
    )
    .await?;
    Ok(Json(todos))
}

/// Todos owned by a user, filtered by priority and pinned status
#[utoipa::path(
    get,
    path = "/api/todos/user/{user_id}/priority/{priority}/pinned/{pinned}",
    params(
        ("user_id" = Uuid, Path, description = "Owner user ID"),
        ("priority" = Priority, Path, description = "Priority (LOW, MEDIUM, HIGH)"),
        ("pinned" = bool, Path, description = "Pinned flag")
    ),
    responses((status = 200, description = "Filtered todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos_by_user_priority_and_pinned(
    State(state): State<AppState>,
    Path((user_id, priority, pinned)): Path<(Uuid, Priority, bool)>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = TodoService::get_todos_by_user_priority_and_pinned(
        &state.db, user_id, priority, pinned,
    )
    .await?;
    Ok(Json(todos))
}

/// Todos owned by a user, filtered by priority and completion status
#[utoipa::path(
    get,
    path = "/api/todos/user/{user_id}/priority/{priority}/completion/{completed}",
    params(
        ("user_id" = Uuid, Path, description = "Owner user ID"),
        ("priority" = Priority, Path, description = "Priority (LOW, MEDIUM, HIGH)"),
        ("completed" = bool, Path, description = "Completion flag")
    ),
    responses((status = 200, description = "Filtered todos", body = Vec<Todo>)),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument(skip(state))]
pub async fn get_todos_by_user_priority_and_completion(
    State(state): State<AppState>,
    Path((user_id, priority, completed)): Path<(Uuid, Priority, bool)>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = TodoService::get_todos_by_user_priority_and_completion(
        &state.db, user_id, priority, completed,
    )
    .await?;
    Ok(Json(todos))
}
