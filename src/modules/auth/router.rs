use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{login, me, register};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users/me", get(me))
}
