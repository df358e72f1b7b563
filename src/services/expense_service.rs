use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use crate::models::expense::{CreateExpenseRequest, Expense, NewExpense, UpdateExpenseRequest};
use crate::models::filters::{ExpenseFilters, ExpensePage, ListParams};
use crate::models::report::{DailyTotal, MonthlyReport, MonthlyTotal, YearlyReport};
use crate::repositories::{ExpenseRepository, RepositoryError};

/// Date format accepted for expense dates and range filters
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Expense service errors
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    #[error("the amount entered is not a valid number")]
    InvalidAmount,

    #[error("The date {0} does not match the format DD-MM-YYYY")]
    InvalidDate(String),

    #[error("The date {0} does not match the format MM-YYYY")]
    InvalidMonth(String),

    #[error("The date {0} does not match the format YYYY")]
    InvalidYear(String),

    #[error("Please enter a valid name")]
    InvalidName,

    #[error("The Expense with this ID: {0} does not exist")]
    NotFound(i32),

    #[error("Page or Limit must be greater than 1")]
    InvalidPagination,

    #[error("The page {0} does not exist")]
    PageNotFound(i64),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<RepositoryError> for ExpenseError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => ExpenseError::DatabaseError("Unexpected miss".to_string()),
            RepositoryError::DatabaseError(msg) => ExpenseError::DatabaseError(msg),
            RepositoryError::ConstraintViolation(msg) => ExpenseError::DatabaseError(msg),
        }
    }
}

/// Trait defining expense service operations. Every operation is scoped to
/// the authenticated user id resolved by the auth middleware.
#[async_trait]
pub trait ExpenseService: Send + Sync {
    /// Create a new expense owned by the user
    async fn create(
        &self,
        user_id: i32,
        request: CreateExpenseRequest,
    ) -> Result<Expense, ExpenseError>;

    /// Fetch a single expense by id
    async fn get(&self, user_id: i32, id: i32) -> Result<Expense, ExpenseError>;

    /// Update name, amount and/or date of an existing expense
    async fn update(
        &self,
        user_id: i32,
        id: i32,
        request: UpdateExpenseRequest,
    ) -> Result<Expense, ExpenseError>;

    /// Delete an expense by id
    async fn delete(&self, user_id: i32, id: i32) -> Result<i32, ExpenseError>;

    /// Filtered, paginated listing of the user's expenses
    async fn list(&self, user_id: i32, params: ListParams) -> Result<ExpensePage, ExpenseError>;

    /// Per-date totals for one month (MM-YYYY)
    async fn monthly_report(
        &self,
        user_id: i32,
        month: &str,
    ) -> Result<MonthlyReport, ExpenseError>;

    /// Per-month totals for one year (YYYY)
    async fn yearly_report(&self, user_id: i32, year: &str) -> Result<YearlyReport, ExpenseError>;
}

/// Implementation of ExpenseService
pub struct ExpenseServiceImpl {
    expense_repository: Arc<dyn ExpenseRepository>,
    default_page_limit: i64,
    max_page_limit: i64,
}

impl ExpenseServiceImpl {
    pub fn new(
        expense_repository: Arc<dyn ExpenseRepository>,
        default_page_limit: i64,
        max_page_limit: i64,
    ) -> Self {
        Self {
            expense_repository,
            default_page_limit,
            max_page_limit,
        }
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, ExpenseError> {
    Decimal::from_str(raw.trim()).map_err(|_| ExpenseError::InvalidAmount)
}

fn parse_date(raw: &str) -> Result<NaiveDate, ExpenseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ExpenseError::InvalidDate(raw.trim().to_string()))
}

/// Parses a MM-YYYY month selector into (year, month)
fn parse_month(raw: &str) -> Result<(i32, u32), ExpenseError> {
    let invalid = || ExpenseError::InvalidMonth(raw.to_string());

    let (month_part, year_part) = raw.split_once('-').ok_or_else(invalid)?;
    let month: u32 = month_part.trim().parse().map_err(|_| invalid())?;
    let year: i32 = year_part.trim().parse().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Parses a 4-digit YYYY year selector
fn parse_year(raw: &str) -> Result<i32, ExpenseError> {
    let trimmed = raw.trim();
    if trimmed.len() != 4 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ExpenseError::InvalidYear(raw.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| ExpenseError::InvalidYear(raw.to_string()))
}

#[async_trait]
impl ExpenseService for ExpenseServiceImpl {
    async fn create(
        &self,
        user_id: i32,
        request: CreateExpenseRequest,
    ) -> Result<Expense, ExpenseError> {
        // Validation order matches the API contract: amount, then date,
        // then name.
        let amount = parse_amount(request.amount.as_deref().unwrap_or(""))?;
        let date_of_expense = parse_date(request.date_of_expense.as_deref().unwrap_or(""))?;

        let name = request.name.unwrap_or_default();
        if name.is_empty() {
            return Err(ExpenseError::InvalidName);
        }

        let expense = self
            .expense_repository
            .create(NewExpense {
                name,
                amount,
                date_of_expense,
                belongs_to: user_id,
            })
            .await?;

        Ok(expense)
    }

    async fn get(&self, user_id: i32, id: i32) -> Result<Expense, ExpenseError> {
        self.expense_repository
            .find_for_user(user_id, id)
            .await?
            .ok_or(ExpenseError::NotFound(id))
    }

    async fn update(
        &self,
        user_id: i32,
        id: i32,
        request: UpdateExpenseRequest,
    ) -> Result<Expense, ExpenseError> {
        let existing = self
            .expense_repository
            .find_for_user(user_id, id)
            .await?
            .ok_or(ExpenseError::NotFound(id))?;

        let amount = match request.amount.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_amount(raw)?,
            _ => existing.amount,
        };

        let date_of_expense = match request.date_of_expense.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_date(raw)?,
            _ => existing.date_of_expense,
        };

        // The name is required on every update, even when only the amount
        // or date changes.
        let name = match request.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ExpenseError::InvalidName),
        };

        let updated = self
            .expense_repository
            .update(id, &name, amount, date_of_expense)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ExpenseError::NotFound(id),
                other => other.into(),
            })?;

        Ok(updated)
    }

    async fn delete(&self, user_id: i32, id: i32) -> Result<i32, ExpenseError> {
        self.expense_repository
            .find_for_user(user_id, id)
            .await?
            .ok_or(ExpenseError::NotFound(id))?;

        self.expense_repository
            .delete(id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ExpenseError::NotFound(id),
                other => other.into(),
            })?;

        Ok(id)
    }

    async fn list(&self, user_id: i32, params: ListParams) -> Result<ExpensePage, ExpenseError> {
        // Gibberish limit or page values silently fall back to defaults
        let mut limit = params
            .limit
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(self.default_page_limit);

        if limit > self.max_page_limit {
            limit = self.max_page_limit;
        }

        let page = params
            .page
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(1);

        if limit < 1 || page < 1 {
            return Err(ExpenseError::InvalidPagination);
        }

        let mut filters = ExpenseFilters::default();

        if let Some(name) = params.name.filter(|n| !n.is_empty()) {
            filters.name = Some(name);
        }
        if let Some(raw) = params.start_date.filter(|d| !d.is_empty()) {
            filters.start_date = Some(parse_date(&raw)?);
        }
        if let Some(raw) = params.end_date.filter(|d| !d.is_empty()) {
            filters.end_date = Some(parse_date(&raw)?);
        }

        let total_items = self.expense_repository.count(user_id, &filters).await?;
        let total_pages = (total_items + limit - 1) / limit;

        // Anything past the last page is a miss, like a missing expense id
        if page > 1 && page > total_pages {
            return Err(ExpenseError::PageNotFound(page));
        }

        let offset = page.saturating_sub(1).saturating_mul(limit);
        let items = self
            .expense_repository
            .find_page(user_id, &filters, limit, offset)
            .await?;

        let prev_page = (page > 1)
            .then(|| format!("/expenses/?limit={}&page={}", limit, page - 1));
        let next_page = (page < total_pages)
            .then(|| format!("/expenses/?limit={}&page={}", limit, page + 1));

        Ok(ExpensePage {
            items,
            total_items,
            total_pages,
            prev_page,
            next_page,
        })
    }

    async fn monthly_report(
        &self,
        user_id: i32,
        month: &str,
    ) -> Result<MonthlyReport, ExpenseError> {
        let (year, month) = parse_month(month)?;

        let rows = self
            .expense_repository
            .daily_totals(user_id, year, month)
            .await?;

        let mut consolidated_total = Decimal::ZERO;
        let items = rows
            .into_iter()
            .map(|(date, total)| {
                consolidated_total += total;
                DailyTotal {
                    date: date.format("%d/%m/%Y").to_string(),
                    total_expenses: total,
                }
            })
            .collect();

        Ok(MonthlyReport {
            items,
            consolidated_total,
        })
    }

    async fn yearly_report(&self, user_id: i32, year: &str) -> Result<YearlyReport, ExpenseError> {
        let year = parse_year(year)?;

        let rows = self.expense_repository.monthly_totals(user_id, year).await?;

        let mut consolidated_total = Decimal::ZERO;
        let months = rows
            .into_iter()
            .map(|(month, total)| {
                consolidated_total += total;
                MonthlyTotal {
                    month: format!("{}-{}", month, year),
                    total_expenses: total,
                }
            })
            .collect();

        Ok(YearlyReport {
            months,
            consolidated_total,
        })
    }
}
