use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::User;

// JWT claims carried by every access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, max = 100, message = "password must be 6-100 characters"))]
    pub password: String,
    #[validate(length(min = 2, max = 100, message = "first_name must be 2-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, max = 100, message = "last_name must be 2-100 characters"))]
    pub last_name: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Returned by both register and login: the public user projection plus
/// a signed bearer token. The password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}
