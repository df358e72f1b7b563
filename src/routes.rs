use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{auth_handlers, expense_handlers, ErrorResponse};
use crate::middleware::auth_middleware;
use crate::models::{
    AuthToken, CreateExpenseRequest, DeleteResponse, Expense, ExpensePage, LoginRequest,
    MonthlyReport, RegisterRequest, UpdateExpenseRequest, User, YearlyReport,
};
use crate::services::{AuthService, ExpenseService};

/// OpenAPI documentation for the API
#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handlers::register,
        auth_handlers::login,
        expense_handlers::create_expense,
        expense_handlers::get_expense,
        expense_handlers::update_expense,
        expense_handlers::delete_expense,
        expense_handlers::list_expenses,
        expense_handlers::monthly_report,
        expense_handlers::yearly_report,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        User,
        AuthToken,
        CreateExpenseRequest,
        UpdateExpenseRequest,
        Expense,
        ExpensePage,
        DeleteResponse,
        MonthlyReport,
        YearlyReport,
        ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "expenses", description = "Expense management"),
        (name = "reports", description = "Spending reports")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// Assembles the full application router. Every expense and report route
/// sits behind the bearer-token middleware; registration, login and the
/// health check stay open.
pub fn build_router(
    auth_service: Arc<dyn AuthService>,
    expense_service: Arc<dyn ExpenseService>,
) -> Router {
    let expense_routes = Router::new()
        .route(
            "/expenses",
            get(expense_handlers::list_expenses).post(expense_handlers::create_expense),
        )
        .route(
            "/expenses/",
            get(expense_handlers::list_expenses).post(expense_handlers::create_expense),
        )
        .route(
            "/expenses/{id}",
            get(expense_handlers::get_expense)
                .put(expense_handlers::update_expense)
                .delete(expense_handlers::delete_expense),
        )
        .route("/monthly_report", get(expense_handlers::monthly_report))
        .route("/yearly_report", get(expense_handlers::yearly_report))
        .layer(from_fn_with_state(auth_service.clone(), auth_middleware))
        .with_state(expense_service);

    let auth_routes = Router::new()
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login))
        .with_state(auth_service);

    Router::new()
        .merge(expense_routes)
        .merge(auth_routes)
        .route("/health", get(health))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
