use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::handlers::error_response;
use crate::services::AuthService;

/// Identity resolved from the bearer token, inserted into request
/// extensions for the protected handlers.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}

/// Validates the Authorization header and resolves the requesting user.
///
/// The header is expected to carry `Bearer <token>`; each malformed shape
/// gets its own 401 message so clients can tell what went wrong.
pub async fn auth_middleware(
    State(auth_service): State<Arc<dyn AuthService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let header_value = match request.headers().get(header::AUTHORIZATION) {
        Some(value) => value,
        None => {
            return error_response(StatusCode::UNAUTHORIZED, "Authorization header missing");
        }
    };

    let header_str = match header_value.to_str() {
        Ok(s) => s,
        Err(_) => {
            return error_response(StatusCode::UNAUTHORIZED, "Please insert Bearer token");
        }
    };

    if header_str.is_empty() {
        return error_response(StatusCode::UNAUTHORIZED, "Please insert Bearer token");
    }

    let parts: Vec<&str> = header_str.split(' ').collect();
    if parts.len() < 2 {
        return error_response(
            StatusCode::UNAUTHORIZED,
            "Authorization token should start with keyword Bearer",
        );
    }

    let token = parts[1];
    match auth_service.validate_token(token).await {
        Ok(user_id) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser { user_id });
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
