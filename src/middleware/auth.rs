use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

fn claims_from_headers(headers: &HeaderMap, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format".to_string()))?;

    verify_token(token, jwt_config)
}

/// Bearer-token gate applied to every protected route.
///
/// Verified claims are inserted into request extensions so downstream
/// handlers resolve the current identity without re-verifying.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = claims_from_headers(req.headers(), &state.jwt_config)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Extractor providing the authenticated user's claims to a handler.
///
/// Reads the claims left by [`require_auth`] when present; otherwise
/// verifies the bearer header itself, so handlers outside the gated
/// subtree (e.g. `/api/auth/users/me`) are still protected.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(AuthUser(claims.clone()));
        }

        let claims = claims_from_headers(&parts.headers, &state.jwt_config)?;
        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::create_access_token;
    use axum::http::HeaderValue;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        let err = claims_from_headers(&headers, &test_config()).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_non_bearer_header_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic abc123"),
        );
        let err = claims_from_headers(&headers, &test_config()).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_garbage_token_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer not.a.jwt"),
        );
        let err = claims_from_headers(&headers, &test_config()).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_valid_token_resolves_identity() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, "alice@example.com", &config).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let claims = claims_from_headers(&headers, &config).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "alice@example.com");

        let auth_user = AuthUser(claims);
        assert_eq!(auth_user.user_id().unwrap(), user_id);
        assert_eq!(auth_user.email(), "alice@example.com");
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let token = create_access_token(
            Uuid::new_v4(),
            "alice@example.com",
            &JwtConfig {
                secret: "other-secret".to_string(),
                access_token_expiry: 3600,
            },
        )
        .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        let err = claims_from_headers(&headers, &test_config()).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
