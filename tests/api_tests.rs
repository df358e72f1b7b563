use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Datelike, NaiveDate, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use expense_tracker::models::expense::{Expense, NewExpense};
use expense_tracker::models::filters::ExpenseFilters;
use expense_tracker::models::user::User;
use expense_tracker::repositories::{ExpenseRepository, RepositoryError, UserRepository};
use expense_tracker::routes::build_router;
use expense_tracker::services::{AuthService, AuthServiceImpl, ExpenseService, ExpenseServiceImpl};

struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI32,
}

impl InMemoryUserRepository {
    fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(RepositoryError::ConstraintViolation(
                "Email already exists".to_string(),
            ));
        }
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }
}

struct InMemoryExpenseRepository {
    rows: Mutex<HashMap<i32, Expense>>,
    next_id: AtomicI32,
}

impl InMemoryExpenseRepository {
    fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    fn matching(&self, user_id: i32, filters: &ExpenseFilters) -> Vec<Expense> {
        let rows = self.rows.lock().unwrap();
        let mut matched: Vec<Expense> = rows
            .values()
            .filter(|e| e.belongs_to == user_id)
            .filter(|e| {
                filters
                    .name
                    .as_deref()
                    .map_or(true, |n| e.name.to_lowercase().contains(&n.to_lowercase()))
            })
            .filter(|e| filters.start_date.map_or(true, |d| e.date_of_expense >= d))
            .filter(|e| filters.end_date.map_or(true, |d| e.date_of_expense <= d))
            .cloned()
            .collect();
        matched.sort_by_key(|e| e.id);
        matched
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn create(&self, expense: NewExpense) -> Result<Expense, RepositoryError> {
        let now = Utc::now();
        let row = Expense {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: expense.name,
            amount: expense.amount,
            date_of_expense: expense.date_of_expense,
            date_created: now,
            date_modified: now,
            belongs_to: expense.belongs_to,
        };
        self.rows.lock().unwrap().insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_for_user(
        &self,
        user_id: i32,
        id: i32,
    ) -> Result<Option<Expense>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.get(&id).filter(|e| e.belongs_to == user_id).cloned())
    }

    async fn update(
        &self,
        id: i32,
        name: &str,
        amount: Decimal,
        date_of_expense: NaiveDate,
    ) -> Result<Expense, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        row.name = name.to_string();
        row.amount = amount;
        row.date_of_expense = date_of_expense;
        row.date_modified = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        self.rows
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_page(
        &self,
        user_id: i32,
        filters: &ExpenseFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Expense>, RepositoryError> {
        Ok(self
            .matching(user_id, filters)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, user_id: i32, filters: &ExpenseFilters) -> Result<i64, RepositoryError> {
        Ok(self.matching(user_id, filters).len() as i64)
    }

    async fn daily_totals(
        &self,
        user_id: i32,
        year: i32,
        month: u32,
    ) -> Result<Vec<(NaiveDate, Decimal)>, RepositoryError> {
        let mut totals: HashMap<NaiveDate, Decimal> = HashMap::new();
        for expense in self.rows.lock().unwrap().values() {
            if expense.belongs_to == user_id
                && expense.date_of_expense.year() == year
                && expense.date_of_expense.month() == month
            {
                *totals.entry(expense.date_of_expense).or_default() += expense.amount;
            }
        }
        let mut rows: Vec<_> = totals.into_iter().collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(rows)
    }

    async fn monthly_totals(
        &self,
        user_id: i32,
        year: i32,
    ) -> Result<Vec<(i32, Decimal)>, RepositoryError> {
        let mut totals: HashMap<i32, Decimal> = HashMap::new();
        for expense in self.rows.lock().unwrap().values() {
            if expense.belongs_to == user_id && expense.date_of_expense.year() == year {
                *totals
                    .entry(expense.date_of_expense.month() as i32)
                    .or_default() += expense.amount;
            }
        }
        let mut rows: Vec<_> = totals.into_iter().collect();
        rows.sort_by_key(|(month, _)| *month);
        Ok(rows)
    }
}

fn test_app() -> Router {
    let auth_service: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(
        Arc::new(InMemoryUserRepository::new()),
        "test_secret".to_string(),
        5,
    ));
    let expense_service: Arc<dyn ExpenseService> = Arc::new(ExpenseServiceImpl::new(
        Arc::new(InMemoryExpenseRepository::new()),
        20,
        100,
    ));
    build_router(auth_service, expense_service)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register_and_login(app: &Router, email: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": email, "password": "test12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": "test12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

async fn create_expense(app: &Router, token: &str, name: &str, amount: Value, date: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/expenses",
        Some(token),
        Some(json!({ "name": name, "amount": amount, "date_of_expense": date })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body
}

#[tokio::test]
async fn register_hides_password_hash() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": "user@test.com", "password": "test12345" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "user@test.com");
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn register_rejects_bad_email_and_short_password() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": "not-an-email", "password": "test12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("Invalid email format"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": "user@test.com", "password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Password must be at least 8 characters"));
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let app = test_app();
    register_and_login(&app, "user@test.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": "user@test.com", "password": "test12345" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists");
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let app = test_app();
    register_and_login(&app, "user@test.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "user@test.com", "password": "wrongpassword" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/expenses", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authorization header missing");

    let request = Request::builder()
        .uri("/expenses")
        .header(header::AUTHORIZATION, "Bearer")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body["message"],
        "Authorization token should start with keyword Bearer"
    );

    let (status, body) = send(&app, Method::GET, "/expenses", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid authentication token");
}

#[tokio::test]
async fn create_and_fetch_expense() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;

    let created = create_expense(&app, &token, "snacks", json!("12.23"), "01-01-2021").await;
    assert_eq!(created["name"], "snacks");
    assert_eq!(created["amount"], 12.23);
    assert_eq!(created["date_of_expense"], "01-01-2021");

    let id = created["id"].as_i64().unwrap();
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/expenses/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "snacks");
}

#[tokio::test]
async fn create_accepts_numeric_json_amount() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;

    let created = create_expense(&app, &token, "soda", json!(1233), "10-01-2021").await;
    assert_eq!(created["amount"], 1233.0);
}

#[tokio::test]
async fn create_validation_messages() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/expenses",
        Some(&token),
        Some(json!({ "name": "soda", "amount": "cazc", "date_of_expense": "10-01-2021" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "the amount entered is not a valid number");

    let (status, body) = send(
        &app,
        Method::POST,
        "/expenses",
        Some(&token),
        Some(json!({ "name": "soda", "amount": "1233", "date_of_expense": "fgjfj" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "The date fgjfj does not match the format DD-MM-YYYY"
    );

    let (status, body) = send(
        &app,
        Method::POST,
        "/expenses",
        Some(&token),
        Some(json!({ "name": "", "amount": "1233", "date_of_expense": "10-01-2021" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter a valid name");
}

#[tokio::test]
async fn missing_expense_returns_404_with_id_in_message() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;

    let (status, body) = send(&app, Method::GET, "/expenses/999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "The Expense with this ID: 999 does not exist");
}

#[tokio::test]
async fn update_expense_and_messages() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;
    let created = create_expense(&app, &token, "snacks", json!("12.23"), "01-01-2021").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/expenses/{}", id),
        Some(&token),
        Some(json!({ "name": "chargers", "amount": "200", "date_of_expense": "10-01-2021" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "chargers");
    assert_eq!(body["amount"], 200.0);
    assert_eq!(body["date_of_expense"], "10-01-2021");

    // The name must come along even when only the amount changes
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/expenses/{}", id),
        Some(&token),
        Some(json!({ "amount": "300" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter a valid name");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/expenses/999",
        Some(&token),
        Some(json!({ "name": "soda" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "The Expense with this ID: 999 does not exist");
}

#[tokio::test]
async fn delete_then_fetch_returns_404() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;
    let created = create_expense(&app, &token, "snacks", json!("12.23"), "01-01-2021").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/expenses/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!("Expense {} deleted successfully", id)
    );

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/expenses/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_paginates_with_links() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;
    for i in 0..25 {
        create_expense(&app, &token, &format!("item{}", i), json!("1"), "01-01-2021").await;
    }

    let (status, body) = send(&app, Method::GET, "/expenses", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 20);
    assert_eq!(body["total_items"], 25);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["prev_page"], Value::Null);
    assert_eq!(body["next_page"], "/expenses/?limit=20&page=2");

    let (status, body) = send(
        &app,
        Method::GET,
        "/expenses?page=2",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
    assert_eq!(body["prev_page"], "/expenses/?limit=20&page=1");
    assert_eq!(body["next_page"], Value::Null);
}

#[tokio::test]
async fn list_limit_is_clamped_and_gibberish_falls_back() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;
    for i in 0..3 {
        create_expense(&app, &token, &format!("item{}", i), json!("1"), "01-01-2021").await;
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/expenses?limit=500&page=1",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);

    let (status, body) = send(
        &app,
        Method::GET,
        "/expenses?limit=abc&page=xyz",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn list_rejects_zero_page_or_limit() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;

    let (status, body) = send(&app, Method::GET, "/expenses?page=0", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Page or Limit must be greater than 1");

    let (status, body) = send(&app, Method::GET, "/expenses?limit=0", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Page or Limit must be greater than 1");
}

#[tokio::test]
async fn list_page_past_the_end_returns_404() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;
    create_expense(&app, &token, "snacks", json!("1"), "01-01-2021").await;

    let (status, body) = send(&app, Method::GET, "/expenses?page=3", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "The page 3 does not exist");

    // A page value at the top of the i64 range must not take the request down
    let (status, _) = send(
        &app,
        Method::GET,
        "/expenses?page=9223372036854775807",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_filters_by_name_case_insensitively() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;
    create_expense(&app, &token, "Snacks", json!("1"), "01-01-2021").await;
    create_expense(&app, &token, "soda", json!("1"), "01-01-2021").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/expenses?name=snacks",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Snacks");
}

#[tokio::test]
async fn list_filters_by_inclusive_date_range() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;
    create_expense(&app, &token, "snacks", json!("1"), "01-01-2021").await;
    create_expense(&app, &token, "soda", json!("1"), "10-01-2021").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/expenses?start_date=01-01-2021&end_date=10-01-2021",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Method::GET,
        "/expenses?start_date=12sjfnj",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "The date 12sjfnj does not match the format DD-MM-YYYY"
    );
}

#[tokio::test]
async fn expenses_are_scoped_to_their_owner() {
    let app = test_app();
    let token1 = register_and_login(&app, "user1@test.com").await;
    let token2 = register_and_login(&app, "user2@test.com").await;

    let created = create_expense(&app, &token1, "snacks", json!("12.23"), "01-01-2021").await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/expenses/{}", id),
        Some(&token2),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/expenses", Some(&token2), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 0);
}

#[tokio::test]
async fn monthly_report_sums_and_formats() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;
    create_expense(&app, &token, "snacks", json!("12.23"), "01-01-2021").await;
    create_expense(&app, &token, "soda", json!("200"), "10-01-2021").await;
    create_expense(&app, &token, "books", json!("50"), "05-02-2021").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/monthly_report?month=01-2021",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["consolidated_total"], 212.23);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["date"], "10/01/2021");
    assert_eq!(items[1]["date"], "01/01/2021");
}

#[tokio::test]
async fn monthly_report_rejects_bad_or_missing_month() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/monthly_report?month=4567",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The date 4567 does not match the format MM-YYYY");

    let (status, body) = send(&app, Method::GET, "/monthly_report", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The date  does not match the format MM-YYYY");
}

#[tokio::test]
async fn yearly_report_sums_by_month() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;
    create_expense(&app, &token, "snacks", json!("12.23"), "01-01-2021").await;
    create_expense(&app, &token, "soda", json!("200"), "10-01-2021").await;
    create_expense(&app, &token, "books", json!("50"), "05-02-2021").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/yearly_report?year=2021",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["consolidated_total"], 262.23);
    let months = body["months"].as_array().unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0]["month"], "1-2021");
    assert_eq!(months[0]["total_expenses"], 212.23);
    assert_eq!(months[1]["month"], "2-2021");
    assert_eq!(months[1]["total_expenses"], 50.0);
}

#[tokio::test]
async fn yearly_report_rejects_bad_year() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/yearly_report?year=sdfg",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The date sdfg does not match the format YYYY");
}

#[tokio::test]
async fn trailing_slash_routes_work() {
    let app = test_app();
    let token = register_and_login(&app, "user@test.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/expenses/",
        Some(&token),
        Some(json!({ "name": "snacks", "amount": "1", "date_of_expense": "01-01-2021" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);

    let (status, _) = send(&app, Method::GET, "/expenses/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
