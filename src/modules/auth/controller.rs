use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{AuthResponse, LoginRequest, RegisterRequestDto};
use super::service::AuthService;

#[derive(serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = AuthService::register(&state.db, dto, &state.jwt_config).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Current user profile, resolved from the verified token
#[utoipa::path(
    get,
    path = "/api/auth/users/me",
    responses(
        (status = 200, description = "Current user profile", body = User),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, auth_user))]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user_id = auth_user.user_id()?;
    let user = UserService::get_user(&state.db, user_id).await?;
    Ok(Json(user))
}
