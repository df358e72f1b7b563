use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::expense::Expense;

/// Raw query parameters for the list endpoint. Limit and page stay strings
/// so that unparsable values can silently fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListParams {
    pub limit: Option<String>,
    pub page: Option<String>,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Parsed filters applied to the expense page and count queries
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilters {
    /// Case-insensitive substring match on the expense name
    pub name: Option<String>,
    /// Inclusive lower bound on date_of_expense
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on date_of_expense
    pub end_date: Option<NaiveDate>,
}

/// One page of expenses plus pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpensePage {
    pub items: Vec<Expense>,
    pub total_items: i64,
    pub total_pages: i64,
    pub prev_page: Option<String>,
    pub next_page: Option<String>,
}
