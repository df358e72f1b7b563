use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::expense::{Expense, NewExpense};
use crate::models::filters::ExpenseFilters;
use crate::repositories::RepositoryError;

const EXPENSE_COLUMNS: &str =
    "id, name, amount, date_of_expense, date_created, date_modified, belongs_to";

/// Trait defining expense repository operations
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Persist a new expense row
    async fn create(&self, expense: NewExpense) -> Result<Expense, RepositoryError>;

    /// Find an expense by id, scoped to its owner
    async fn find_for_user(
        &self,
        user_id: i32,
        id: i32,
    ) -> Result<Option<Expense>, RepositoryError>;

    /// Overwrite name, amount and date of an existing expense, refreshing
    /// date_modified
    async fn update(
        &self,
        id: i32,
        name: &str,
        amount: Decimal,
        date_of_expense: NaiveDate,
    ) -> Result<Expense, RepositoryError>;

    /// Delete an expense by id
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;

    /// Fetch one page of a user's expenses matching the filters
    async fn find_page(
        &self,
        user_id: i32,
        filters: &ExpenseFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Expense>, RepositoryError>;

    /// Count a user's expenses matching the filters
    async fn count(&self, user_id: i32, filters: &ExpenseFilters)
        -> Result<i64, RepositoryError>;

    /// Per-date totals for one calendar month, most recent date first
    async fn daily_totals(
        &self,
        user_id: i32,
        year: i32,
        month: u32,
    ) -> Result<Vec<(NaiveDate, Decimal)>, RepositoryError>;

    /// Per-month totals for one calendar year, in calendar order
    async fn monthly_totals(
        &self,
        user_id: i32,
        year: i32,
    ) -> Result<Vec<(i32, Decimal)>, RepositoryError>;
}

/// PostgreSQL implementation of ExpenseRepository
pub struct PostgresExpenseRepository {
    pool: PgPool,
}

impl PostgresExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Appends the filter conditions to `query`, numbering bind parameters
/// starting after `param_count`. Returns the updated count; the caller
/// binds values in the same order.
fn push_filter_conditions(query: &mut String, filters: &ExpenseFilters, mut param_count: u32) -> u32 {
    if filters.name.is_some() {
        param_count += 1;
        query.push_str(&format!(" AND name ILIKE ${}", param_count));
    }

    if filters.start_date.is_some() {
        param_count += 1;
        query.push_str(&format!(" AND date_of_expense >= ${}", param_count));
    }

    if filters.end_date.is_some() {
        param_count += 1;
        query.push_str(&format!(" AND date_of_expense <= ${}", param_count));
    }

    param_count
}

#[async_trait]
impl ExpenseRepository for PostgresExpenseRepository {
    async fn create(&self, expense: NewExpense) -> Result<Expense, RepositoryError> {
        sqlx::query_as::<_, Expense>(&format!(
            r#"
            INSERT INTO expenses (name, amount, date_of_expense, belongs_to)
            VALUES ($1, $2, $3, $4)
            RETURNING {EXPENSE_COLUMNS}
            "#,
        ))
        .bind(&expense.name)
        .bind(expense.amount)
        .bind(expense.date_of_expense)
        .bind(expense.belongs_to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }

    async fn find_for_user(
        &self,
        user_id: i32,
        id: i32,
    ) -> Result<Option<Expense>, RepositoryError> {
        sqlx::query_as::<_, Expense>(&format!(
            r#"
            SELECT {EXPENSE_COLUMNS}
            FROM expenses
            WHERE id = $1 AND belongs_to = $2
            "#,
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }

    async fn update(
        &self,
        id: i32,
        name: &str,
        amount: Decimal,
        date_of_expense: NaiveDate,
    ) -> Result<Expense, RepositoryError> {
        sqlx::query_as::<_, Expense>(&format!(
            r#"
            UPDATE expenses
            SET name = $2,
                amount = $3,
                date_of_expense = $4,
                date_modified = NOW()
            WHERE id = $1
            RETURNING {EXPENSE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(name)
        .bind(amount)
        .bind(date_of_expense)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
        .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }

    async fn find_page(
        &self,
        user_id: i32,
        filters: &ExpenseFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Expense>, RepositoryError> {
        let mut query = format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE belongs_to = $1"
        );
        let param_count = push_filter_conditions(&mut query, filters, 1);
        query.push_str(" ORDER BY id");
        query.push_str(&format!(
            " LIMIT ${} OFFSET ${}",
            param_count + 1,
            param_count + 2
        ));

        let mut sqlx_query = sqlx::query_as::<_, Expense>(&query).bind(user_id);

        if let Some(name) = &filters.name {
            sqlx_query = sqlx_query.bind(format!("%{}%", name));
        }
        if let Some(start_date) = filters.start_date {
            sqlx_query = sqlx_query.bind(start_date);
        }
        if let Some(end_date) = filters.end_date {
            sqlx_query = sqlx_query.bind(end_date);
        }

        sqlx_query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }

    async fn count(
        &self,
        user_id: i32,
        filters: &ExpenseFilters,
    ) -> Result<i64, RepositoryError> {
        let mut query = String::from("SELECT COUNT(*) FROM expenses WHERE belongs_to = $1");
        push_filter_conditions(&mut query, filters, 1);

        let mut sqlx_query = sqlx::query_scalar::<_, i64>(&query).bind(user_id);

        if let Some(name) = &filters.name {
            sqlx_query = sqlx_query.bind(format!("%{}%", name));
        }
        if let Some(start_date) = filters.start_date {
            sqlx_query = sqlx_query.bind(start_date);
        }
        if let Some(end_date) = filters.end_date {
            sqlx_query = sqlx_query.bind(end_date);
        }

        sqlx_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }

    async fn daily_totals(
        &self,
        user_id: i32,
        year: i32,
        month: u32,
    ) -> Result<Vec<(NaiveDate, Decimal)>, RepositoryError> {
        sqlx::query_as::<_, (NaiveDate, Decimal)>(
            r#"
            SELECT date_of_expense, SUM(amount) AS total
            FROM expenses
            WHERE belongs_to = $1
              AND EXTRACT(YEAR FROM date_of_expense) = $2
              AND EXTRACT(MONTH FROM date_of_expense) = $3
            GROUP BY date_of_expense
            ORDER BY date_of_expense DESC
            "#,
        )
        .bind(user_id)
        .bind(year)
        .bind(month as i32)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }

    async fn monthly_totals(
        &self,
        user_id: i32,
        year: i32,
    ) -> Result<Vec<(i32, Decimal)>, RepositoryError> {
        sqlx::query_as::<_, (i32, Decimal)>(
            r#"
            SELECT CAST(EXTRACT(MONTH FROM date_of_expense) AS INT) AS month,
                   SUM(amount) AS total
            FROM expenses
            WHERE belongs_to = $1
              AND EXTRACT(YEAR FROM date_of_expense) = $2
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(user_id)
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }
}
