use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::require_auth;
use crate::modules::auth::router::init_auth_router;
use crate::modules::todos::router::init_todos_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest(
                    "/todos",
                    init_todos_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_auth,
                    )),
                )
                .nest(
                    "/users",
                    init_users_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_auth,
                    )),
                ),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
