pub mod expense_repository;
pub mod user_repository;

/// Repository errors for database operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Resource not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub use expense_repository::{ExpenseRepository, PostgresExpenseRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
