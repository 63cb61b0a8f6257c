//! End-to-end flow over the public router.
//!
//! Drives a scripted sequence of requests and checks after every step that
//! `GET /students` matches a plain list maintained alongside.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use student_registry::api::{create_router, docs, AppState};
use student_registry::registry::{IdStrategy, StudentStore};

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn assert_listing(app: &Router, expected: &[Value]) {
    let (status, body) = call(app, Method::GET, "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(expected.to_vec()));
}

#[tokio::test]
async fn scripted_crud_flow_matches_model() {
    let app = create_router(AppState::default(), docs::openapi(3000));
    let mut model = vec![
        json!({"id": 1, "name": "Alice", "age": 20, "grade": "A"}),
        json!({"id": 2, "name": "Bob", "age": 21, "grade": "B"}),
    ];
    assert_listing(&app, &model).await;

    // Create two records.
    for (name, age, grade) in [("Carol", 22, "C"), ("Dave", 23, "D")] {
        let (status, created) = call(
            &app,
            Method::POST,
            "/students",
            Some(json!({"name": name, "age": age, "grade": grade})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let expected = json!({"id": model.len() + 1, "name": name, "age": age, "grade": grade});
        assert_eq!(created, expected);
        model.push(expected);
        assert_listing(&app, &model).await;
    }

    // Update the middle record.
    let (status, body) = call(
        &app,
        Method::PUT,
        "/students/3",
        Some(json!({"name": "Caroline", "age": 24, "grade": "B"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student updated successfully"}));
    model[2] = json!({"id": 3, "name": "Caroline", "age": 24, "grade": "B"});
    assert_listing(&app, &model).await;

    // Delete from the front; later records shift but keep their ids.
    let (status, body) = call(&app, Method::DELETE, "/students/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student deleted successfully"}));
    model.remove(0);
    assert_listing(&app, &model).await;

    // Deleting again is a miss and changes nothing.
    let (status, body) = call(&app, Method::DELETE, "/students/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Student not found"}));
    assert_listing(&app, &model).await;

    // Three records left, so the next id collides with Dave's.
    let (status, created) = call(&app, Method::POST, "/students", Some(json!({"name": "Eve"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, json!({"id": 4, "name": "Eve"}));
    model.push(created);
    assert_listing(&app, &model).await;

    let (_, found) = call(&app, Method::GET, "/students/4", None).await;
    assert_eq!(found["name"], "Dave");
}

#[tokio::test]
async fn unseeded_sequence_store_starts_empty() {
    let state = AppState::new(StudentStore::new(IdStrategy::Sequence));
    let app = create_router(state, docs::openapi(3000));
    assert_listing(&app, &[]).await;

    let (_, first) = call(&app, Method::POST, "/students", Some(json!({"name": "A"}))).await;
    let (_, second) = call(&app, Method::POST, "/students", Some(json!({"name": "B"}))).await;
    call(&app, Method::DELETE, "/students/1", None).await;
    let (_, third) = call(&app, Method::POST, "/students", Some(json!({"name": "C"}))).await;

    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 2);
    assert_eq!(third["id"], 3);
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let app = create_router(AppState::default(), docs::openapi(3000));

    let mut handles = Vec::new();
    for i in 0..16 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            call(&app, Method::POST, "/students", Some(json!({"age": i}))).await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        let (status, created) = handle.await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        ids.push(created["id"].as_i64().unwrap());
    }
    ids.sort_unstable();

    assert_eq!(ids, (3..=18).collect::<Vec<i64>>());
}
