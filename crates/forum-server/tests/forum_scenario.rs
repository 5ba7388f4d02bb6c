//! The full create / answer / fetch / delete walk-through.

mod common;

use axum::http::StatusCode;
use common::{send, setup_app};
use serde_json::json;

#[tokio::test]
async fn test_question_answer_lifecycle() {
    let (app, _pool) = setup_app();

    let (status, question) =
        send(&app, "POST", "/api/questions", Some(json!({ "title": "Why?" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(question["id"], 1);
    assert_eq!(question["title"], "Why?");
    assert!(question["createdAt"].is_string());

    let (status, answer) = send(
        &app,
        "POST",
        "/api/questions/1/answers",
        Some(json!({ "content": "Because." })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(answer["id"], 1);
    assert_eq!(answer["content"], "Because.");
    assert_eq!(answer["questionId"], 1);
    assert!(answer["createdAt"].is_string());

    let (status, full) = send(&app, "GET", "/api/questions/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        full,
        json!({
            "id": 1,
            "title": "Why?",
            "createdAt": question["createdAt"],
            "answers": [answer],
        })
    );

    let (status, _) = send(&app, "DELETE", "/api/questions/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", "/api/questions/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "question not found" }));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _pool) = setup_app();
    let (status, _) = send(&app, "GET", "/api/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_headers_present() {
    let (app, _pool) = setup_app();
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/questions")
        .header("origin", "http://localhost:5173")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
