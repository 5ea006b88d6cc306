//! Database row types shared by the SQLite and PostgreSQL adapters.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use transactions_types::{
    Currency, RepoError, Transaction, TransactionId, TransactionKind, UserId,
};

/// Name given to users created implicitly by their first transaction.
pub const DEFAULT_USER_NAME: &str = "Default User";

/// Placeholder email of an implicitly created user.
pub fn default_user_email(user_id: UserId) -> String {
    format!("user{}@example.com", user_id)
}

/// Column list matching [`DbTransaction`].
pub const TRANSACTION_COLUMNS: &str =
    "id, user_id, amount, currency, type, category, date, description";

/// Transaction row from database.
#[derive(Debug, FromRow)]
pub struct DbTransaction {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub currency: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub category: Option<String>,
    pub date: DateTime<Utc>,
    pub description: String,
}

impl DbTransaction {
    /// Convert database row to domain Transaction.
    pub fn into_domain(self) -> Result<Transaction, RepoError> {
        let currency =
            Currency::new(&self.currency).map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(Transaction {
            id: TransactionId::new(self.id),
            user_id: UserId::new(self.user_id),
            amount: self.amount,
            currency,
            kind: TransactionKind::from(self.kind),
            category: self.category,
            date: self.date,
            description: self.description,
        })
    }
}
