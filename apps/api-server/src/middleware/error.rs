//! Error handling middleware - `{"error": "..."}` responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::DomainError;
use blog_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to `{error}` responses.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    BadRequest(String),
    /// A store failure. `action` names what failed for the client; `detail` is only logged.
    Internal {
        action: &'static str,
        detail: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound => write!(f, "Post not found"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal { action, detail } => {
                write!(f, "Failed to {}: {}", action, detail)
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound => ErrorResponse::not_found(),
            AppError::BadRequest(msg) => ErrorResponse::new(msg.as_str()),
            AppError::Internal { action, detail } => {
                // Log internal errors
                tracing::error!(action, "Internal error: {}", detail);
                ErrorResponse::internal_error(action)
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl AppError {
    pub fn invalid_id() -> Self {
        AppError::BadRequest(ErrorResponse::invalid_id().error)
    }

    /// Map a domain error, naming the action reported on a store failure.
    pub fn during(action: &'static str) -> impl FnOnce(DomainError) -> AppError {
        move |err| match err {
            DomainError::NotFound { .. } => AppError::NotFound,
            DomainError::MissingFields => AppError::BadRequest(err.to_string()),
            DomainError::Validation(field_error) => {
                AppError::BadRequest(field_error.message.to_string())
            }
            DomainError::Repo(repo_error) => AppError::Internal {
                action,
                detail: repo_error.to_string(),
            },
        }
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::during("process request")(err)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
