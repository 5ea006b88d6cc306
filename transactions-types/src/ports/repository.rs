//! Repository port trait.
//!
//! Adapters (Postgres, SQLite, in-memory mocks) implement this trait.

use crate::domain::{Transaction, TransactionId, UserId};
use crate::dto::{CreateTransactionRequest, UpdateTransactionRequest};
use crate::error::RepoError;

/// Persistence port for transactions and their owning users.
#[async_trait::async_trait]
pub trait TransactionRepository: Send + Sync + 'static {
    /// Stores a new transaction, creating its owning user first if needed.
    ///
    /// User provisioning and the insert MUST happen atomically.
    async fn create_transaction(
        &self,
        req: CreateTransactionRequest,
    ) -> Result<Transaction, RepoError>;

    /// Lists all transactions owned by a user, oldest first.
    async fn list_transactions_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Transaction>, RepoError>;

    /// Gets a transaction by ID.
    async fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError>;

    /// Replaces the mutable fields of a transaction. Returns `None` if no such row.
    async fn update_transaction(
        &self,
        id: TransactionId,
        req: UpdateTransactionRequest,
    ) -> Result<Option<Transaction>, RepoError>;

    /// Deletes a transaction. Returns `false` if no such row.
    async fn delete_transaction(&self, id: TransactionId) -> Result<bool, RepoError>;
}
