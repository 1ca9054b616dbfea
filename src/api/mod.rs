//! HTTP surface of the board.
//!
//! A thin translation layer: handlers validate request shape, call the
//! service, and wrap the outcome in the wire envelope. Every failure
//! becomes `{"success": false, "message": ...}` with the status chosen by
//! `Error::http_status` - no error crosses this boundary unwrapped.

pub mod config;
pub mod tasks;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use crate::error::Error;
use crate::service::TaskService;
use crate::task::Task;

/// Shared application state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub service: TaskService,
}

/// Build the API router over a service instance
pub fn router(service: TaskService) -> Router {
    Router::new()
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        .route(
            "/api/tasks/{id}",
            get(tasks::get).put(tasks::update).delete(tasks::delete),
        )
        .route("/api/tasks/{id}/complete", post(tasks::complete))
        .route("/api/tasks/{id}/current", post(tasks::move_to_current))
        .route("/api/tasks/{id}/subtasks", post(tasks::add_subtask))
        .route(
            "/api/tasks/{id}/subtasks/{subtask_id}/toggle",
            post(tasks::toggle_subtask),
        )
        .route("/api/config", get(config::get).put(config::update))
        .with_state(AppState { service })
}

/// Standard response envelope for task operations
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
}

impl Envelope {
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            task: None,
        })
    }

    pub fn with_task(message: impl Into<String>, task: Task) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            task: Some(task),
        })
    }

    pub fn task_only(task: Task) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            task: Some(task),
        })
    }
}

/// Service error carried out through a handler
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        #[derive(Serialize)]
        struct ErrorBody {
            success: bool,
            message: String,
        }

        let body = ErrorBody {
            success: false,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;
