use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{AuthResponse, LoginRequest, RegisterRequestDto};
use crate::modules::todos::model::{
    CreateTodoDto, PaginatedTodosResponse, Priority, Todo, UpdateTodoDto,
};
use crate::modules::users::model::{
    CreateUserDto, SortOrder, TodoSortBy, UpdateUserDto, User, UserWithTodos,
};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::get_user_by_email,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::get_user_todos,
        crate::modules::users::controller::get_user_todos_sorted,
        crate::modules::users::controller::get_user_todos_by_completion,
        crate::modules::todos::controller::get_todos,
        crate::modules::todos::controller::get_todo,
        crate::modules::todos::controller::create_todo,
        crate::modules::todos::controller::update_todo,
        crate::modules::todos::controller::delete_todo,
        crate::modules::todos::controller::pin_todo,
        crate::modules::todos::controller::unpin_todo,
        crate::modules::todos::controller::complete_todo,
        crate::modules::todos::controller::uncomplete_todo,
        crate::modules::todos::controller::get_pinned_todos,
        crate::modules::todos::controller::get_completed_todos,
        crate::modules::todos::controller::get_todos_by_completion,
        crate::modules::todos::controller::get_todos_by_pinned,
        crate::modules::todos::controller::get_todos_by_priority,
        crate::modules::todos::controller::get_todos_by_user,
        crate::modules::todos::controller::get_todos_by_user_and_priority,
        crate::modules::todos::controller::get_todos_by_user_and_completion,
        crate::modules::todos::controller::get_todos_by_user_and_pinned,
        crate::modules::todos::controller::get_todos_by_priority_and_completion,
        crate::modules::todos::controller::get_todos_by_priority_and_pinned,
        crate::modules::todos::controller::get_todos_by_user_priority_and_completion,
        crate::modules::todos::controller::get_todos_by_user_completion_and_pinned,
        crate::modules::todos::controller::get_todos_by_user_priority_and_pinned,
    ),
    components(
        schemas(
            User,
            CreateUserDto,
            UpdateUserDto,
            UserWithTodos,
            TodoSortBy,
            SortOrder,
            Todo,
            Priority,
            CreateTodoDto,
            UpdateTodoDto,
            PaginatedTodosResponse,
            RegisterRequestDto,
            LoginRequest,
            AuthResponse,
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and current-user endpoints"),
        (name = "Users", description = "User management endpoints"),
        (name = "Todos", description = "Todo management and filtering endpoints")
    ),
    info(
        title = "Taskhive API",
        version = "0.1.0",
        description = "A todo-list REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
