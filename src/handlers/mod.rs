pub mod auth_handlers;
pub mod expense_handlers;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::{AuthError, ExpenseError};

/// Error body shared by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: "error".to_string(),
        }
    }
}

/// Builds the `{message, status: "error"}` response with the given code
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let AuthError::Internal(ref detail) = self {
            tracing::error!(%detail, "auth request failed");
        }

        error_response(status, self.to_string())
    }
}

impl IntoResponse for ExpenseError {
    fn into_response(self) -> Response {
        let status = match self {
            ExpenseError::InvalidAmount
            | ExpenseError::InvalidDate(_)
            | ExpenseError::InvalidMonth(_)
            | ExpenseError::InvalidYear(_)
            | ExpenseError::InvalidName => StatusCode::BAD_REQUEST,
            ExpenseError::NotFound(_)
            | ExpenseError::InvalidPagination
            | ExpenseError::PageNotFound(_) => StatusCode::NOT_FOUND,
            ExpenseError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let ExpenseError::DatabaseError(ref detail) = self {
            tracing::error!(%detail, "expense request failed");
        }

        error_response(status, self.to_string())
    }
}
