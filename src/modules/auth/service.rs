use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{PUBLIC_USER_COLUMNS, User};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{AuthResponse, LoginRequest, RegisterRequestDto};

// Both "unknown email" and "wrong password" return this exact message so
// responses cannot be used to enumerate registered accounts.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterRequestDto,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
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
            "INSERT INTO users (first_name, last_name, email, password)
             VALUES ($1, $2, $3, $4)
             RETURNING {PUBLIC_USER_COLUMNS}"
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await?;

        let token = create_access_token(user.id, &user.email, jwt_config)?;

        Ok(AuthResponse { user, token })
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let row: Option<(Uuid, String)> =
            sqlx::query_as("SELECT id, password FROM users WHERE email = $1")
                .bind(&dto.email)
                .fetch_optional(db)
                .await?;

        let (user_id, password_hash) =
            row.ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&dto.password, &password_hash)? {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {PUBLIC_USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_one(db)
        .await?;

        let token = create_access_token(user.id, &user.email, jwt_config)?;

        Ok(AuthResponse { user, token })
    }
}
