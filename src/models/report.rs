use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sum of one day's expenses within a monthly report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyTotal {
    /// Report dates use DD/MM/YYYY, unlike the rest of the API
    #[schema(example = "01/01/2021")]
    pub date: String,
    pub total_expenses: Decimal,
}

/// Monthly report: per-date totals, most recent date first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyReport {
    pub items: Vec<DailyTotal>,
    pub consolidated_total: Decimal,
}

/// Sum of one calendar month's expenses within a yearly report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyTotal {
    /// Month label in M-YYYY form, e.g. "1-2021"
    #[schema(example = "1-2021")]
    pub month: String,
    pub total_expenses: Decimal,
}

/// Yearly report: per-month totals in calendar order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct YearlyReport {
    pub months: Vec<MonthlyTotal>,
    pub consolidated_total: Decimal,
}
