use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use validator::Validate;

use crate::handlers::{error_response, ErrorResponse};
use crate::models::user::{AuthToken, LoginRequest, RegisterRequest, User};
use crate::services::AuthService;

/// Register a new user account
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid email or password", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(auth_service): State<Arc<dyn AuthService>>,
    Json(request): Json<RegisterRequest>,
) -> Response {
    if let Err(errors) = request.validate() {
        return error_response(StatusCode::BAD_REQUEST, validation_message(&errors));
    }

    match auth_service.register(request).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "user registered");
            (StatusCode::CREATED, Json(user)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Authenticate and receive a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = AuthToken),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(auth_service): State<Arc<dyn AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Response {
    match auth_service.login(request).await {
        Ok(token) => (StatusCode::OK, Json(token)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Flattens validator output into a single message line
fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|field_errors| {
            field_errors.iter().filter_map(|e| {
                e.message.as_ref().map(|m| m.to_string())
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
