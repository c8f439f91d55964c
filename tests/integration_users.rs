mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_todo, create_test_user, generate_unique_email, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn authed_token(pool: &PgPool) -> String {
    common::register_and_get_token(pool, &generate_unique_email(), "secret123").await
}

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_users_require_auth(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/users")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_excludes_password(pool: PgPool) {
    let token = authed_token(&pool).await;
    create_test_user(&pool, &generate_unique_email(), "somepass1").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app.oneshot(get("/api/users", &token)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body.as_array().unwrap();
    assert!(users.len() >= 2);
    for user in users {
        assert!(user.get("password").is_none());
        assert!(user.get("email").is_some());
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_via_api(pool: PgPool) {
    let token = authed_token(&pool).await;
    let email = generate_unique_email();

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "email": email,
                "first_name": "Rami",
                "last_name": "Haddad",
                "password": "secret123",
                "bio": "Keeps lists of lists"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["email"], email);
    assert_eq!(body["bio"], "Keeps lists of lists");
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_user_by_email(pool: PgPool) {
    let token = authed_token(&pool).await;
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "somepass1").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(get(&format!("/api/users/email/{}", email), &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], user.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_missing_user_is_404(pool: PgPool) {
    let token = authed_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(get(&format!("/api/users/{}", Uuid::new_v4()), &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update_user(pool: PgPool) {
    let token = authed_token(&pool).await;
    let user = create_test_user(&pool, &generate_unique_email(), "somepass1").await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/users/{}", user.id))
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "bio": "Updated bio" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["bio"], "Updated bio");
    // Untouched fields keep their values
    assert_eq!(body["first_name"], "Test");
    assert_eq!(body["email"], user.email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_cascades_todos(pool: PgPool) {
    let token = authed_token(&pool).await;
    let user = create_test_user(&pool, &generate_unique_email(), "somepass1").await;
    let todo_id = create_test_todo(&pool, user.id, "Goes with the owner").await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/users/{}", user.id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/api/todos/{}", todo_id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_todos_sorted_by_priority(pool: PgPool) {
    let token = authed_token(&pool).await;
    let user = create_test_user(&pool, &generate_unique_email(), "somepass1").await;

    for (title, priority) in [("c", "HIGH"), ("a", "LOW"), ("b", "MEDIUM")] {
        sqlx::query("INSERT INTO todos (title, priority, user_id) VALUES ($1, $2::priority, $3)")
            .bind(title)
            .bind(priority)
            .bind(user.id)
            .execute(&pool)
            .await
            .unwrap();
    }

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(get(
            &format!(
                "/api/users/{}/todos/sorted?sort_by=priority&sort_order=asc",
                user.id
            ),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], user.id.to_string());
    let priorities: Vec<&str> = body["todos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["priority"].as_str().unwrap())
        .collect();
    // Postgres orders enum values by declaration order: LOW, MEDIUM, HIGH
    assert_eq!(priorities, vec!["LOW", "MEDIUM", "HIGH"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_todos_by_completion(pool: PgPool) {
    let token = authed_token(&pool).await;
    let user = create_test_user(&pool, &generate_unique_email(), "somepass1").await;

    sqlx::query("INSERT INTO todos (title, completed, user_id) VALUES ($1, TRUE, $2)")
        .bind("done one")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    create_test_todo(&pool, user.id, "open one").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(get(
            &format!("/api/users/{}/todos/completion?completed=true", user.id),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let todos = body["todos"].as_array().unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["title"], "done one");
}
