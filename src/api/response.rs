// API response utility functions module

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;
use serde_json::json;

/// Header set carried by every response, success or failure
const CORS_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type,Authorization"),
    ("Access-Control-Allow-Methods", "OPTIONS,POST,GET"),
    ("Content-Type", "application/json"),
];

fn with_cors(status: StatusCode) -> hyper::http::response::Builder {
    let mut builder = Response::builder().status(status);
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }
    builder
}

fn build(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    with_cors(status)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build {status} response: {e}"));
            Response::new(Full::new(Bytes::from("Internal Server Error")))
        })
}

/// Build JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_string(body) {
        Ok(json) => build(status, json),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            internal_error()
        }
    }
}

/// 404 for an unmatched route
pub fn route_not_found() -> Response<Full<Bytes>> {
    build(
        StatusCode::NOT_FOUND,
        json!({"message": "Not Found"}).to_string(),
    )
}

/// 404 for a missing resource
pub fn not_found(message: &str) -> Response<Full<Bytes>> {
    build(StatusCode::NOT_FOUND, json!({"error": message}).to_string())
}

/// 400 Bad Request response
pub fn bad_request(message: &str) -> Response<Full<Bytes>> {
    build(
        StatusCode::BAD_REQUEST,
        json!({"error": message}).to_string(),
    )
}

/// Router-level 500; fault detail stays in the log
pub fn internal_error() -> Response<Full<Bytes>> {
    build(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"message": "Internal Server Error"}).to_string(),
    )
}

/// Handler-level 500 for an unexpected collaborator fault
pub fn service_error() -> Response<Full<Bytes>> {
    build(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "Internal Server Error"}).to_string(),
    )
}
