use thiserror::Error;

/// Error type that captures store, storage and configuration failures.
///
/// Report functions never fail; only the layers around them return this.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Budget not found: {0}")]
    BudgetNotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FinanceError>;
