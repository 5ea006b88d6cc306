//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Currency, TransactionId, TransactionKind, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// Transaction DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// Owning user; created on the fly if unknown
    #[schema(value_type = i64, example = 7)]
    pub user_id: UserId,
    #[schema(example = 100.0)]
    pub amount: f64,
    #[schema(value_type = String, example = "USD")]
    pub currency: Currency,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "transfer")]
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Defaults to the time of insertion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
}

/// Request to replace the mutable fields of a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateTransactionRequest {
    #[schema(example = 120.0)]
    pub amount: f64,
    #[schema(value_type = String, example = "EUR")]
    pub currency: Currency,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "purchase")]
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Keeps the stored date when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
}

/// Response after recording a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(value_type = i64, example = 42)]
    pub id: TransactionId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Query parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Query string of `GET /transactions`.
///
/// Kept as raw text so the handler can tell "missing" from "not a number".
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTransactionsQuery {
    /// Owning user ID (integer, required)
    pub user_id: Option<String>,
}

/// Query string of `GET /transactions/{id}`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetTransactionQuery {
    /// Display currency; the amount is converted when it differs from the stored one
    pub currency: Option<String>,
}
