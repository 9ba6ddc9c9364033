//! Response types and error handling for API endpoints
//!
//! Every failure is rendered as `{success: false, message, code}`. Handlers
//! attach their fixed failure message with [`FailureMessage::or_fail`], which
//! only replaces server faults; client errors keep their own message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blog_common::{domain_status, AppError, ErrorResponse};
use blog_core::DomainError;
use blog_service::ServiceError;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// Generic server fault message
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Invalid or expired access token")]
    InvalidToken,

    /// A server fault reported under the handler's fixed message
    #[error("{message}")]
    Failed {
        message: &'static str,
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => status_from_u16(e.status_code()),
            Self::Service(e) => status_from_u16(e.status_code()),
            Self::Domain(e) => status_from_u16(domain_status(e)),
            Self::Validation(_) | Self::InvalidPath(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::MissingAuth | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidBody(_) => "INVALID_REQUEST_BODY",
            Self::MissingAuth => "MISSING_AUTHORIZATION",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Failed { source, .. } => source.error_code(),
        }
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

fn status_from_u16(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let body = ErrorResponse::new(self.error_code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Report server faults under a fixed, handler-specific message
pub trait FailureMessage<T> {
    fn or_fail(self, message: &'static str) -> ApiResult<T>;
}

impl<T, E> FailureMessage<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn or_fail(self, message: &'static str) -> ApiResult<T> {
        self.map_err(|e| {
            let err = e.into();
            if err.status_code().is_server_error() {
                ApiError::Failed {
                    message,
                    source: Box::new(err),
                }
            } else {
                err
            }
        })
    }
}
