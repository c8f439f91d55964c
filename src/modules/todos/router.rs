use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{
    complete_todo, create_todo, delete_todo, get_completed_todos, get_pinned_todos, get_todo,
    get_todos, get_todos_by_completion, get_todos_by_pinned, get_todos_by_priority,
    get_todos_by_priority_and_completion, get_todos_by_priority_and_pinned, get_todos_by_user,
    get_todos_by_user_and_completion, get_todos_by_user_and_pinned,
    get_todos_by_user_and_priority, get_todos_by_user_completion_and_pinned,
    get_todos_by_user_priority_and_completion, get_todos_by_user_priority_and_pinned, pin_todo,
    uncomplete_todo, unpin_todo, update_todo,
};

pub fn init_todos_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_todos).post(create_todo))
        .route("/pinned", get(get_pinned_todos))
        .route("/pinned/{pinned}", get(get_todos_by_pinned))
        .route("/completed", get(get_completed_todos))
        .route("/completion/{completed}", get(get_todos_by_completion))
        .route("/priority/{priority}", get(get_todos_by_priority))
        .route(
            "/priority/{priority}/completion/{completed}",
            get(get_todos_by_priority_and_completion),
        )
        .route(
            "/priority/{priority}/pinned/{pinned}",
            get(get_todos_by_priority_and_pinned),
        )
        .route("/user/{user_id}", get(get_todos_by_user))
        .route(
            "/user/{user_id}/priority/{priority}",
            get(get_todos_by_user_and_priority),
        )
        .route(
            "/user/{user_id}/priority/{priority}/completion/{completed}",
            get(get_todos_by_user_priority_and_completion),
        )
        .route(
            "/user/{user_id}/priority/{priority}/pinned/{pinned}",
            get(get_todos_by_user_priority_and_pinned),
        )
        .route(
            "/user/{user_id}/completion/{completed}",
            get(get_todos_by_user_and_completion),
        )
        .route(
            "/user/{user_id}/completion/{completed}/pinned/{pinned}",
            get(get_todos_by_user_completion_and_pinned),
        )
        .route(
            "/user/{user_id}/pinned/{pinned}",
            get(get_todos_by_user_and_pinned),
        )
        .route(
            "/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/{id}/pin", put(pin_todo))
        .route("/{id}/unpin", put(unpin_todo))
        .route("/{id}/complete", put(complete_todo))
        .route("/{id}/uncomplete", put(uncomplete_todo))
}
