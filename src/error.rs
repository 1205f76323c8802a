// HTTP API Error Types
use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::services::identity::IdentityError;
use crate::store::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request - malformed identifier or payload shape
    InvalidInput(String),

    // 400 Bad Request - the store accepted a write but returned no row
    OperationFailed(String),

    // 400 Bad Request - transport/unexpected failure talking to a collaborator.
    // The underlying message is surfaced to the caller; see DESIGN.md.
    DataAccess(String),

    // 401 Unauthorized - always answered with a generic message and a
    // WWW-Authenticate challenge; the real cause is only logged
    Unauthorized,

    // 404 Not Found
    NotFound(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::OperationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::DataAccess(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidInput(msg) => msg,
            ApiError::OperationFailed(msg) => msg,
            ApiError::DataAccess(msg) => msg,
            ApiError::Unauthorized => "Invalid authentication credentials",
            ApiError::NotFound(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::OperationFailed(_) => "OPERATION_FAILED",
            ApiError::DataAccess(_) => "DATA_ACCESS_ERROR",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    pub fn operation_failed(message: impl Into<String>) -> Self {
        ApiError::OperationFailed(message.into())
    }

    pub fn data_access(message: impl Into<String>) -> Self {
        ApiError::DataAccess(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::not_found(err.to_string()),
            StoreError::EmptyWrite { .. } => ApiError::operation_failed(err.to_string()),
            StoreError::InvalidUrl(_)
            | StoreError::Rejected { .. }
            | StoreError::Transport(_)
            | StoreError::Decode(_) => {
                tracing::error!("store error: {}", err);
                ApiError::data_access(err.to_string())
            }
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        tracing::error!("identity provider error: {}", err);
        ApiError::data_access(format!("Failed to retrieve user: {}", err))
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = Json(self.to_json());

        if matches!(self, ApiError::Unauthorized) {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }

        (status, body).into_response()
    }
}
