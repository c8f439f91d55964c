use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_user, delete_user, get_user, get_user_by_email, get_user_todos,
    get_user_todos_by_completion, get_user_todos_sorted, get_users, update_user,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users).post(create_user))
        .route("/email/{email}", get(get_user_by_email))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/todos", get(get_user_todos))
        .route("/{id}/todos/sorted", get(get_user_todos_sorted))
        .route("/{id}/todos/completion", get(get_user_todos_by_completion))
}
