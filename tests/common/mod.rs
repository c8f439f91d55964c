use sqlx::PgPool;
use taskhive::config::cors::CorsConfig;
use taskhive::config::jwt::JwtConfig;
use taskhive::router::init_router;
use taskhive::state::AppState;
use taskhive::utils::password::hash_password;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub async fn create_test_user(pool: &PgPool, email: &str, password: &str) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (first_name, last_name, email, password)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind("Test")
    .bind("User")
    .bind(email)
    .bind(hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_todo(pool: &PgPool, user_id: Uuid, title: &str) -> Uuid {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO todos (title, user_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(title)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

/// Register through the API and return the issued bearer token.
#[allow(dead_code)]
pub async fn register_and_get_token(pool: &PgPool, email: &str, password: &str) -> String {
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "email": email,
                "password": password,
                "first_name": "Test",
                "last_name": "User"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["token"].as_str().unwrap().to_string()
}
