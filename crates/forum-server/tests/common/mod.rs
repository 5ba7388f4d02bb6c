#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use forum_db::{create_pool, initialize_schema, DbPool, DbRuntimeSettings};
use forum_server::{app, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub fn setup_app() -> (Router, DbPool) {
    let pool = create_pool(":memory:", DbRuntimeSettings::default()).unwrap();
    {
        let conn = pool.get().unwrap();
        initialize_schema(&conn).unwrap();
    }

    (app(AppState { pool: pool.clone() }), pool)
}

/// Sends a request and returns the status and the parsed JSON body
/// (`Value::Null` for an empty body).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}

pub async fn create_question(app: &Router, title: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/questions",
        Some(serde_json::json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {body}");
    body
}

pub async fn create_answer(app: &Router, question_id: i64, content: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/questions/{question_id}/answers"),
        Some(serde_json::json!({ "content": content })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {body}");
    body
}

pub fn count_rows(pool: &DbPool, table: &str) -> i64 {
    let conn = pool.get().unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
