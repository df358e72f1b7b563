use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::handlers::ErrorResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::expense::{CreateExpenseRequest, DeleteResponse, UpdateExpenseRequest};
use crate::models::filters::ListParams;
use crate::models::report::{MonthlyReport, YearlyReport};
use crate::services::ExpenseService;

/// Month selector for the monthly report endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthQuery {
    /// Month in MM-YYYY format
    pub month: Option<String>,
}

/// Year selector for the yearly report endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct YearQuery {
    /// Year in YYYY format
    pub year: Option<String>,
}

/// Create a new expense
#[utoipa::path(
    post,
    path = "/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense created", body = crate::models::Expense),
        (status = 400, description = "Invalid amount, date or name", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "expenses"
)]
pub async fn create_expense(
    State(expense_service): State<Arc<dyn ExpenseService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateExpenseRequest>,
) -> Response {
    match expense_service.create(user.user_id, request).await {
        Ok(expense) => {
            tracing::info!(expense_id = expense.id, user_id = user.user_id, "expense created");
            (StatusCode::CREATED, Json(expense)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Fetch a single expense by id
#[utoipa::path(
    get,
    path = "/expenses/{id}",
    params(("id" = i32, Path, description = "Expense id")),
    responses(
        (status = 200, description = "The expense", body = crate::models::Expense),
        (status = 404, description = "No expense with this id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "expenses"
)]
pub async fn get_expense(
    State(expense_service): State<Arc<dyn ExpenseService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Response {
    match expense_service.get(user.user_id, id).await {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update an existing expense
#[utoipa::path(
    put,
    path = "/expenses/{id}",
    params(("id" = i32, Path, description = "Expense id")),
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Updated expense", body = crate::models::Expense),
        (status = 400, description = "Invalid amount, date or name", body = ErrorResponse),
        (status = 404, description = "No expense with this id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "expenses"
)]
pub async fn update_expense(
    State(expense_service): State<Arc<dyn ExpenseService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Response {
    match expense_service.update(user.user_id, id, request).await {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete an expense
#[utoipa::path(
    delete,
    path = "/expenses/{id}",
    params(("id" = i32, Path, description = "Expense id")),
    responses(
        (status = 200, description = "Deletion confirmation", body = DeleteResponse),
        (status = 404, description = "No expense with this id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "expenses"
)]
pub async fn delete_expense(
    State(expense_service): State<Arc<dyn ExpenseService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Response {
    match expense_service.delete(user.user_id, id).await {
        Ok(id) => {
            tracing::info!(expense_id = id, user_id = user.user_id, "expense deleted");
            (
                StatusCode::OK,
                Json(DeleteResponse {
                    message: format!("Expense {} deleted successfully", id),
                }),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// List expenses with optional filters and pagination
#[utoipa::path(
    get,
    path = "/expenses",
    params(ListParams),
    responses(
        (status = 200, description = "One page of expenses", body = crate::models::ExpensePage),
        (status = 400, description = "Malformed date filter", body = ErrorResponse),
        (status = 404, description = "Page or limit below 1, or page past the end", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "expenses"
)]
pub async fn list_expenses(
    State(expense_service): State<Arc<dyn ExpenseService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<ListParams>,
) -> Response {
    match expense_service.list(user.user_id, params).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Per-date spending totals for one month
#[utoipa::path(
    get,
    path = "/monthly_report",
    params(MonthQuery),
    responses(
        (status = 200, description = "Daily totals and consolidated total", body = MonthlyReport),
        (status = 400, description = "Malformed month selector", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn monthly_report(
    State(expense_service): State<Arc<dyn ExpenseService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let month = query.month.unwrap_or_default();
    match expense_service.monthly_report(user.user_id, &month).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Per-month spending totals for one year
#[utoipa::path(
    get,
    path = "/yearly_report",
    params(YearQuery),
    responses(
        (status = 200, description = "Monthly totals and consolidated total", body = YearlyReport),
        (status = 400, description = "Malformed year selector", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn yearly_report(
    State(expense_service): State<Arc<dyn ExpenseService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<YearQuery>,
) -> Response {
    let year = query.year.unwrap_or_default();
    match expense_service.yearly_report(user.user_id, &year).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}
