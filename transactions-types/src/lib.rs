//! # Transactions Types
//!
//! Domain types, the commission policy and port traits for the transactions
//! service. This crate has no IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Transactions, currencies and the commission policy
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CommissionRecord, CommissionRequest, Currency, Transaction, TransactionId, TransactionKind,
    UserId,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{ExchangeError, ExchangeRateProvider, TransactionRepository};
