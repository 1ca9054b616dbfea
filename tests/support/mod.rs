use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use flowboard::api;
use flowboard::service::TaskService;
use flowboard::storage::Storage;

/// A board served from a throwaway data directory.
pub struct TestApp {
    _dir: TempDir,
    storage: Storage,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let storage = Storage::new(dir.path().join("data"));
        storage.init().expect("failed to init storage");
        let router = api::router(TaskService::new(storage.clone()));
        Self {
            _dir: dir,
            storage,
            router,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("failed to build request"),
            None => builder.body(Body::empty()).expect("failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router error");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        // extractor rejections come back as plain text; surface them as a string
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    /// Create a task and return its id.
    pub async fn create_task(&self, body: Value) -> String {
        let (status, json) = self.post("/api/tasks", body).await;
        assert_eq!(status, StatusCode::OK, "create failed: {json}");
        json["task"]["id"]
            .as_str()
            .expect("created task has no id")
            .to_string()
    }
}
