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

fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_todos_require_auth(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/todos")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_todo_without_priority(pool: PgPool) {
    let token = authed_token(&pool).await;
    let user = create_test_user(&pool, &generate_unique_email(), "ownerpass1").await;

    let app = setup_test_app(pool.clone()).await;
    let request = json_request(
        "POST",
        "/api/todos",
        &token,
        json!({ "title": "Buy groceries", "user_id": user.id }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["title"], "Buy groceries");
    // An omitted priority stays null rather than being coerced to a default
    assert!(body["priority"].is_null());
    assert_eq!(body["completed"], false);
    assert_eq!(body["pinned"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_todo_unknown_owner_rejected(pool: PgPool) {
    let token = authed_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let request = json_request(
        "POST",
        "/api/todos",
        &token,
        json!({ "title": "Orphan todo", "user_id": Uuid::new_v4() }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_todo_empty_title_rejected(pool: PgPool) {
    let token = authed_token(&pool).await;
    let user = create_test_user(&pool, &generate_unique_email(), "ownerpass1").await;

    let app = setup_test_app(pool.clone()).await;
    let request = json_request(
        "POST",
        "/api/todos",
        &token,
        json!({ "title": "", "user_id": user.id }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update_leaves_other_fields(pool: PgPool) {
    let token = authed_token(&pool).await;
    let user = create_test_user(&pool, &generate_unique_email(), "ownerpass1").await;

    let app = setup_test_app(pool.clone()).await;
    let created = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/todos",
                &token,
                json!({
                    "title": "Write report",
                    "description": "Quarterly numbers",
                    "priority": "HIGH",
                    "user_id": user.id
                }),
            ))
            .await
            .unwrap(),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/todos/{}", id),
            &token,
            json!({ "completed": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["completed"], true);
    assert_eq!(body["title"], "Write report");
    assert_eq!(body["description"], "Quarterly numbers");
    assert_eq!(body["priority"], "HIGH");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_todo_is_404(pool: PgPool) {
    let token = authed_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/todos/{}", Uuid::new_v4()),
            &token,
            json!({ "completed": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_then_fetch_is_404(pool: PgPool) {
    let token = authed_token(&pool).await;
    let user = create_test_user(&pool, &generate_unique_email(), "ownerpass1").await;
    let todo_id = create_test_todo(&pool, user.id, "Disposable").await;

    let app = setup_test_app(pool.clone()).await;

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/todos/{}", todo_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/api/todos/{}", todo_id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pagination_pages_are_disjoint(pool: PgPool) {
    let token = authed_token(&pool).await;
    let user = create_test_user(&pool, &generate_unique_email(), "ownerpass1").await;
    for i in 0..15 {
        create_test_todo(&pool, user.id, &format!("Task {}", i)).await;
    }

    let app = setup_test_app(pool.clone()).await;

    let page1 = body_json(
        app.clone()
            .oneshot(get("/api/todos?page=1&limit=10", &token))
            .await
            .unwrap(),
    )
    .await;
    let page2 = body_json(
        app.oneshot(get("/api/todos?page=2&limit=10", &token))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(page1["data"].as_array().unwrap().len(), 10);
    assert_eq!(page2["data"].as_array().unwrap().len(), 5);
    assert_eq!(page1["meta"]["total"], 15);
    assert_eq!(page1["meta"]["total_pages"], 2);
    assert_eq!(page2["meta"]["page"], 2);

    let ids_on = |page: &serde_json::Value| -> Vec<String> {
        page["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap().to_string())
            .collect()
    };
    let page1_ids = ids_on(&page1);
    for id in ids_on(&page2) {
        assert!(!page1_ids.contains(&id));
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pin_and_complete_toggles(pool: PgPool) {
    let token = authed_token(&pool).await;
    let user = create_test_user(&pool, &generate_unique_email(), "ownerpass1").await;
    let todo_id = create_test_todo(&pool, user.id, "Toggle me").await;

    let app = setup_test_app(pool.clone()).await;

    let put = |uri: String| {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    };

    let body = body_json(
        app.clone()
            .oneshot(put(format!("/api/todos/{}/pin", todo_id)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["pinned"], true);

    let body = body_json(
        app.clone()
            .oneshot(put(format!("/api/todos/{}/complete", todo_id)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["completed"], true);
    assert_eq!(body["pinned"], true);

    let body = body_json(
        app.clone()
            .oneshot(put(format!("/api/todos/{}/unpin", todo_id)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["pinned"], false);

    let body = body_json(
        app.oneshot(put(format!("/api/todos/{}/uncomplete", todo_id)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["completed"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_filter_routes(pool: PgPool) {
    let token = authed_token(&pool).await;
    let user = create_test_user(&pool, &generate_unique_email(), "ownerpass1").await;
    let other = create_test_user(&pool, &generate_unique_email(), "ownerpass2").await;

    let app = setup_test_app(pool.clone()).await;

    for (title, priority, completed, owner) in [
        ("High urgent", Some("HIGH"), true, user.id),
        ("High pending", Some("HIGH"), false, user.id),
        ("Low pending", Some("LOW"), false, user.id),
        ("Other's task", Some("HIGH"), true, other.id),
    ] {
        let mut body = json!({ "title": title, "user_id": owner, "completed": completed });
        if let Some(p) = priority {
            body["priority"] = json!(p);
        }
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/todos", &token, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let count = |body: serde_json::Value| body.as_array().unwrap().len();

    let body = body_json(
        app.clone()
            .oneshot(get("/api/todos/priority/HIGH", &token))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(count(body), 3);

    let body = body_json(
        app.clone()
            .oneshot(get(&format!("/api/todos/user/{}", user.id), &token))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(count(body), 3);

    let body = body_json(
        app.clone()
            .oneshot(get(
                &format!("/api/todos/user/{}/completion/true", user.id),
                &token,
            ))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(count(body), 1);

    let body = body_json(
        app.clone()
            .oneshot(get("/api/todos/priority/HIGH/completion/true", &token))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(count(body), 2);

    let body = body_json(
        app.oneshot(get(
            &format!("/api/todos/user/{}/priority/HIGH/completion/false", user.id),
            &token,
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(count(body), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pinned_filter_routes(pool: PgPool) {
    let token = authed_token(&pool).await;
    let user = create_test_user(&pool, &generate_unique_email(), "ownerpass1").await;
    let other = create_test_user(&pool, &generate_unique_email(), "ownerpass2").await;

    for (title, priority, completed, pinned, owner) in [
        ("Pinned done high", Some("HIGH"), true, true, user.id),
        ("Pinned open high", Some("HIGH"), false, true, user.id),
        ("Unpinned done", None, true, false, user.id),
        ("Other's pinned high", Some("HIGH"), true, true, other.id),
    ] {
        sqlx::query(
            "INSERT INTO todos (title, priority, completed, pinned, user_id)
             VALUES ($1, $2::priority, $3, $4, $5)",
        )
        .bind(title)
        .bind(priority)
        .bind(completed)
        .bind(pinned)
        .bind(owner)
        .execute(&pool)
        .await
        .unwrap();
    }

    let app = setup_test_app(pool.clone()).await;
    let titles = |body: serde_json::Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap().to_string())
            .collect()
    };

    let body = body_json(
        app.clone()
            .oneshot(get("/api/todos/priority/HIGH/pinned/true", &token))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let body = body_json(
        app.clone()
            .oneshot(get(
                &format!("/api/todos/user/{}/completion/true/pinned/true", user.id),
                &token,
            ))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(titles(body), vec!["Pinned done high"]);

    let body = body_json(
        app.oneshot(get(
            &format!("/api/todos/user/{}/priority/HIGH/pinned/true", user.id),
            &token,
        ))
        .await
        .unwrap(),
    )
    .await;
    let found = titles(body);
    assert_eq!(found.len(), 2);
    assert!(found.contains(&"Pinned done high".to_string()));
    assert!(found.contains(&"Pinned open high".to_string()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_priority_segment_rejected(pool: PgPool) {
    let token = authed_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(get("/api/todos/priority/URGENT", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
