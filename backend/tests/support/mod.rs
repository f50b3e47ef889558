#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

#[cfg(feature = "http-server")]
pub mod http {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    use segment_service::http::{create_router, AppState};

    /// Router over a fresh, empty in-memory store.
    pub fn test_app() -> Router {
        create_router(AppState::in_memory())
    }

    /// Send one request through `app` and decode the JSON response.
    ///
    /// A body is sent as `application/json`.
    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let content_type = body.map(|_| "application/json");
        send_with_content_type(app, method, uri, content_type, body).await
    }

    /// Like [`send`], with full control over the `Content-Type` header.
    pub async fn send_with_content_type(
        app: &Router,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let body = match body {
            Some(text) => Body::from(text.to_string()),
            None => Body::empty(),
        };
        let request = builder.body(body).unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        if bytes.is_empty() {
            return (status, Value::Null);
        }
        assert_eq!(content_type.as_deref(), Some("application/json"));
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn create(app: &Router, name: &str, description: &str) -> Value {
        let body = serde_json::json!({ "name": name, "description": description }).to_string();
        let (status, value) = send(app, Method::POST, "/api/v1/segments", Some(&body)).await;
        assert_eq!(status, StatusCode::CREATED);
        value
    }

    pub fn segment_id(value: &Value) -> i64 {
        value["segmentId"].as_i64().expect("segmentId is an integer")
    }
}
