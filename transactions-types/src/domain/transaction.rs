//! Transaction domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::Currency;

/// Unique identifier for a Transaction (database-assigned).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    /// Wraps a raw database id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Identifier of the user owning a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// The type tag of a transaction.
///
/// Only three tags carry meaning for the commission policy. Any other tag is
/// kept verbatim in `Other` so it round-trips unchanged through storage and
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    /// Money moving from one party to another
    Transfer,
    /// Payment for goods or services
    Purchase,
    /// Money added to the user's balance
    Deposit,
    /// Unrecognized tag
    Other(String),
}

impl TransactionKind {
    /// Returns the wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Transfer => "transfer",
            TransactionKind::Purchase => "purchase",
            TransactionKind::Deposit => "deposit",
            TransactionKind::Other(tag) => tag,
        }
    }
}

impl From<String> for TransactionKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "transfer" => TransactionKind::Transfer,
            "purchase" => TransactionKind::Purchase,
            "deposit" => TransactionKind::Deposit,
            _ => TransactionKind::Other(tag),
        }
    }
}

impl From<&str> for TransactionKind {
    fn from(tag: &str) -> Self {
        TransactionKind::from(tag.to_string())
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded financial transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    /// Unique identifier
    #[schema(value_type = i64, example = 42)]
    pub id: TransactionId,
    /// Owning user
    #[schema(value_type = i64, example = 7)]
    pub user_id: UserId,
    /// Amount in major units of `currency`
    #[schema(example = 100.5)]
    pub amount: f64,
    #[schema(value_type = String, example = "USD")]
    pub currency: Currency,
    /// Free-text type tag ("transfer", "purchase", "deposit", ...)
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "transfer")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: Option<String>,
    /// When the transaction happened
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Returns a copy expressed in `target` at the given rate.
    pub fn converted(&self, rate: f64, target: Currency) -> Self {
        Self {
            amount: self.amount * rate,
            currency: target,
            ..self.clone()
        }
    }
}
