//! Domain models for the transactions service.

pub mod commission;
pub mod currency;
pub mod transaction;

pub use commission::{CommissionRecord, CommissionRequest, calculate, commission_amount};
pub use currency::Currency;
pub use transaction::{Transaction, TransactionId, TransactionKind, UserId};
