/// Common test utilities for lostfound integration tests
///
/// Builds an app over a fresh database and wraps the request/response
/// plumbing shared by the HTTP tests.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use lostfound::{create_app, db::init_pool, models::LostItem};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Creates a test application backed by its own in-memory SQLite database
///
/// A uniquely named shared-cache database keeps every pooled connection on
/// the same data while isolating tests from each other.
pub fn create_test_app() -> Router {
    let database_url = format!("file:it_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
    let pool = init_pool(&database_url).unwrap();

    let mut conn = pool.get().unwrap();
    lostfound::run_migrations(&mut conn).unwrap();
    drop(conn);

    create_app(Arc::new(pool))
}

/// Sends a request and returns the status together with the parsed JSON body
///
/// Bodies that are not JSON come back as a JSON string.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()));

    (status, value)
}

/// Registers a lost item via the API and returns it
///
/// ### Arguments
///
/// * `app` - The test application
/// * `payload` - The JSON body of the POST request
pub async fn create_lost_item(app: &Router, payload: Value) -> LostItem {
    let (status, body) = send(app, "POST", "/lost_items", Some(payload)).await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {}", body);
    serde_json::from_value(body).unwrap()
}
