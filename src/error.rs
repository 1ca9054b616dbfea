//! Error types for flowboard
//!
//! HTTP status mapping per the API contract:
//! - 400: validation failures, WIP-limit rejections, invalid transitions
//! - 404: unknown task or subtask
//! - 500: storage failures (io, serialization, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// HTTP status codes used by the API boundary
pub mod http_status {
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL: u16 = 500;
}

/// Main error type for flowboard operations
#[derive(Error, Debug)]
pub enum Error {
    // Validation failures (400)
    #[error("Title is required")]
    TitleRequired,

    #[error("Subtask title is required")]
    SubtaskTitleRequired,

    #[error("Finish date is required")]
    FinishDateRequired,

    // WIP-limit rejections (400)
    #[error("Maximum {limit} '{task_type}' tasks already open")]
    TypeLimitReached { task_type: String, limit: u32 },

    #[error("Maximum {limit} total active tasks reached")]
    ActiveLimitReached { limit: u32 },

    // Invalid transitions (400)
    #[error("Only backlog tasks can be moved to current")]
    NotInBacklog,

    // Lookup failures (404)
    #[error("Task not found")]
    TaskNotFound,

    #[error("Subtask not found")]
    SubtaskNotFound,

    // Storage failures (500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),
}

impl Error {
    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            // Validation, limits, transitions
            Error::TitleRequired
            | Error::SubtaskTitleRequired
            | Error::FinishDateRequired
            | Error::TypeLimitReached { .. }
            | Error::ActiveLimitReached { .. }
            | Error::NotInBacklog => http_status::BAD_REQUEST,

            // Lookups
            Error::TaskNotFound | Error::SubtaskNotFound => http_status::NOT_FOUND,

            // Storage failures
            Error::Io(_) | Error::Json(_) | Error::LockFailed(_) => http_status::INTERNAL,
        }
    }
}

/// Result type alias for flowboard operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_messages_name_type_and_limit() {
        let err = Error::TypeLimitReached {
            task_type: "customer engagement".to_string(),
            limit: 3,
        };
        assert_eq!(
            err.to_string(),
            "Maximum 3 'customer engagement' tasks already open"
        );

        let err = Error::ActiveLimitReached { limit: 10 };
        assert_eq!(err.to_string(), "Maximum 10 total active tasks reached");
    }

    #[test]
    fn status_groups() {
        assert_eq!(Error::TitleRequired.http_status(), 400);
        assert_eq!(Error::NotInBacklog.http_status(), 400);
        assert_eq!(Error::TaskNotFound.http_status(), 404);
        assert_eq!(Error::SubtaskNotFound.http_status(), 404);
        assert_eq!(
            Error::LockFailed(PathBuf::from("/tmp/x.lock")).http_status(),
            500
        );
    }
}
