//! Error types for the transactions service.

use crate::domain::TransactionId;
use crate::ports::ExchangeError;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    #[error("Amount must be a non-negative number")]
    InvalidAmount,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Entity not found")]
    NotFound,
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The rate provider answered but had no rate for the pair.
    #[error("Rate unavailable: {0}")]
    RateUnavailable(String),

    /// The rate provider could not be reached or answered garbage.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn transaction_not_found(id: TransactionId) -> Self {
        AppError::NotFound(format!("Transaction {} not found", id))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Transaction(e) => AppError::Internal(e),
        }
    }
}

impl From<ExchangeError> for AppError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::RateNotFound { .. } => AppError::RateUnavailable(err.to_string()),
            ExchangeError::Transport(_) | ExchangeError::Read(_) | ExchangeError::Decode(_) => {
                AppError::Upstream(err.to_string())
            }
        }
    }
}
