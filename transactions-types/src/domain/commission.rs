//! Commission policy.
//!
//! A closed lookup table keyed on transaction kind and currency:
//!
//! | kind                  | currency  | commission   |
//! |-----------------------|-----------|--------------|
//! | transfer              | USD       | 2% of amount |
//! | transfer              | RUB       | 5% of amount |
//! | transfer              | other     | 1% of amount |
//! | purchase, deposit     | any       | 0            |
//! | anything else         | any       | 0            |
//!
//! Calculation emits structured `tracing` events to whichever subscriber is
//! current for the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::Currency;
use super::transaction::{Transaction, TransactionId, TransactionKind};

/// Label stamped on every commission record.
pub const COMMISSION_DESCRIPTION: &str = "Calculated commission";

const TRANSFER_USD_RATE: f64 = 0.02;
const TRANSFER_RUB_RATE: f64 = 0.05;
const TRANSFER_DEFAULT_RATE: f64 = 0.01;

/// The transaction fields the commission policy looks at.
///
/// Deserializes from a full transaction payload; fields it does not need are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommissionRequest {
    #[serde(default)]
    #[schema(value_type = i64, example = 42)]
    pub id: TransactionId,
    #[schema(example = 100.0)]
    pub amount: f64,
    #[schema(value_type = String, example = "USD")]
    pub currency: Currency,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "transfer")]
    pub kind: TransactionKind,
}

impl From<&Transaction> for CommissionRequest {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            amount: tx.amount,
            currency: tx.currency.clone(),
            kind: tx.kind.clone(),
        }
    }
}

/// Result of a commission calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommissionRecord {
    #[schema(value_type = i64, example = 42)]
    pub transaction_id: TransactionId,
    #[schema(example = 100.0)]
    pub transaction_amount: f64,
    #[schema(value_type = String, example = "USD")]
    pub currency: Currency,
    #[schema(value_type = String, example = "transfer")]
    pub transaction_type: TransactionKind,
    #[schema(example = 2.0)]
    pub commission_amount: f64,
    /// Time of calculation, not the transaction date
    pub date: DateTime<Utc>,
    #[schema(example = "Calculated commission")]
    pub description: String,
}

/// Commission owed on `amount` for the given kind and currency.
///
/// Pure: depends on nothing but its arguments.
pub fn commission_amount(kind: &TransactionKind, currency: &Currency, amount: f64) -> f64 {
    match kind {
        TransactionKind::Transfer => amount * transfer_rate(currency),
        TransactionKind::Purchase | TransactionKind::Deposit => 0.0,
        // Unrecognized kinds are not charged.
        TransactionKind::Other(_) => 0.0,
    }
}

fn transfer_rate(currency: &Currency) -> f64 {
    match currency.as_str() {
        "USD" => TRANSFER_USD_RATE,
        "RUB" => TRANSFER_RUB_RATE,
        _ => TRANSFER_DEFAULT_RATE,
    }
}

/// Calculates the commission for a transaction and builds its record.
pub fn calculate(req: &CommissionRequest) -> CommissionRecord {
    tracing::info!(
        transaction_id = %req.id,
        amount = req.amount,
        currency = %req.currency,
        kind = %req.kind,
        "Calculating commission for transaction"
    );

    if let TransactionKind::Other(tag) = &req.kind {
        tracing::debug!(kind = %tag, "No commission rule for transaction type");
    }

    let commission = commission_amount(&req.kind, &req.currency, req.amount);

    tracing::info!(
        transaction_id = %req.id,
        commission_amount = commission,
        final_currency = %req.currency,
        "Commission calculated"
    );

    CommissionRecord {
        transaction_id: req.id,
        transaction_amount: req.amount,
        currency: req.currency.clone(),
        transaction_type: req.kind.clone(),
        commission_amount: commission,
        date: Utc::now(),
        description: COMMISSION_DESCRIPTION.to_string(),
    }
}
