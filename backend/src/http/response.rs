//! JSON response encoding.
//!
//! Every response body of the API goes through [`JsonResponse`], including
//! error payloads. Serialization failures are logged and turned into a 500
//! instead of being dropped.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Body sent when a payload cannot be serialized.
const ENCODING_FAILURE_BODY: &str = r#"{"code":"error","error":"Internal server error"}"#;

/// A serializable payload paired with the status code to send it with.
#[derive(Debug, Clone)]
pub struct JsonResponse<T> {
    pub status: StatusCode,
    pub payload: T,
}

impl<T: Serialize> JsonResponse<T> {
    pub fn new(status: StatusCode, payload: T) -> Self {
        Self { status, payload }
    }

    /// 200 OK
    pub fn ok(payload: T) -> Self {
        Self::new(StatusCode::OK, payload)
    }

    /// 201 Created
    pub fn created(payload: T) -> Self {
        Self::new(StatusCode::CREATED, payload)
    }
}

impl<T: Serialize> IntoResponse for JsonResponse<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.payload) {
            Ok(body) => json_body(self.status, body),
            Err(err) => {
                tracing::error!(
                    status = %self.status,
                    error = %err,
                    "Failed to encode response payload"
                );
                json_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ENCODING_FAILURE_BODY.as_bytes().to_vec(),
                )
            }
        }
    }
}

fn json_body(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response()
}
