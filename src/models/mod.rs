pub mod expense;
pub mod filters;
pub mod report;
pub mod user;

pub use expense::{CreateExpenseRequest, DeleteResponse, Expense, NewExpense, UpdateExpenseRequest};
pub use filters::{ExpenseFilters, ExpensePage, ListParams};
pub use report::{DailyTotal, MonthlyReport, MonthlyTotal, YearlyReport};
pub use user::{AuthToken, LoginRequest, RegisterRequest, User};
