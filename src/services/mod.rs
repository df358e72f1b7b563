pub mod auth_service;
pub mod expense_service;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl};
pub use expense_service::{ExpenseError, ExpenseService, ExpenseServiceImpl};
