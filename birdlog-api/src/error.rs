//! Error types for birdlog-api
//!
//! Mutation endpoints answer failures with `{status: "error", message}`,
//! read endpoints with `{error}`. Database errors are logged and reported
//! as a generic message; their text never reaches the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::ValidationError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Mutation endpoint error
#[derive(Debug, Error)]
pub enum ApiError {
    /// Row missing, or owned by someone else (404)
    #[error("Checklist not found")]
    NotFound,

    /// Field failed coercion or validation (400)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No identity on the request (401)
    #[error("Authentication required")]
    Unauthorized,

    /// Store failure (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message
    fn public_message(&self) -> String {
        match self {
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                INTERNAL_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "status": "error",
            "message": self.public_message(),
        }));

        (status, body).into_response()
    }
}

/// Read endpoint error
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let QueryError::Database(e) = self;
        error!("Database error: {}", e);

        let body = Json(json!({
            "error": INTERNAL_MESSAGE,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type for mutation handlers
pub type ApiResult<T> = Result<T, ApiError>;
