//! Request and assertion helpers shared by the HTTP suites. Requests go
//! through `oneshot`, so no listener is ever bound.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::util::ServiceExt;

/// Drive one request through the router. A `Some` body is sent as JSON.
pub async fn request(app: &Router, method: Method, path: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(path);
    let req = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    app.clone().oneshot(req).await.expect("route request")
}

/// Status plus parsed body. An empty body becomes `Value::Null`, so shape
/// assertions against it fail with a readable message instead of a panic
/// here.
pub async fn response_json(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("drain body");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, body)
}

/// A 2xx `{ "success": true, "data": ... }` envelope.
pub fn assert_status_ok_json(status: StatusCode, body: &Value) {
    assert!(status.is_success(), "status {status}, body {body}");
    assert_eq!(body["success"], true, "body {body}");
    assert!(body.get("data").is_some(), "no data field: {body}");
}

/// A `{ "success": false, "code": ..., "message": ... }` envelope.
pub fn assert_json_error(body: &Value, code: &str) {
    assert_eq!(body["success"], false, "body {body}");
    assert_eq!(body["code"], code, "body {body}");
    assert!(body["message"].is_string(), "no message field: {body}");
}
