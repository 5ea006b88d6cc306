//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use transactions_types::{
    CreateTransactionRequest, RepoError, Transaction, TransactionId, TransactionRepository,
    UpdateTransactionRequest, UserId,
};

use crate::types::{DEFAULT_USER_NAME, DbTransaction, TRANSACTION_COLUMNS, default_user_email};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &SqlitePool, sql: &str, name: &str) -> anyhow::Result<()> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to `:memory:` is a separate database, so pin the
        // pool to one long-lived connection.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };

        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_tables.sql"),
            "0001",
        )
        .await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TransactionRepository for SqliteRepo {
    async fn create_transaction(
        &self,
        req: CreateTransactionRequest,
    ) -> Result<Transaction, RepoError> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        let provisioned = sqlx::query(
            r#"INSERT INTO users (id, name, email) VALUES (?, ?, ?) ON CONFLICT (id) DO NOTHING"#,
        )
        .bind(req.user_id.get())
        .bind(DEFAULT_USER_NAME)
        .bind(default_user_email(req.user_id))
        .execute(&mut *db_tx)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if provisioned.rows_affected() > 0 {
            tracing::info!(user_id = %req.user_id, "Created default user for new transaction owner");
        }

        let date = req.date.unwrap_or_else(Utc::now);
        let sql = format!(
            "INSERT INTO transactions (user_id, amount, currency, type, category, date, description) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {TRANSACTION_COLUMNS}"
        );

        let row: DbTransaction = sqlx::query_as(&sql)
            .bind(req.user_id.get())
            .bind(req.amount)
            .bind(req.currency.as_str())
            .bind(req.kind.as_str())
            .bind(&req.category)
            .bind(date)
            .bind(&req.description)
            .fetch_one(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        db_tx
            .commit()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        row.into_domain()
    }

    async fn list_transactions_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Transaction>, RepoError> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE user_id = ? ORDER BY date, id"
        );

        let rows: Vec<DbTransaction> = sqlx::query_as(&sql)
            .bind(user_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbTransaction::into_domain).collect()
    }

    async fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?");

        let row: Option<DbTransaction> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbTransaction::into_domain).transpose()
    }

    async fn update_transaction(
        &self,
        id: TransactionId,
        req: UpdateTransactionRequest,
    ) -> Result<Option<Transaction>, RepoError> {
        let sql = format!(
            "UPDATE transactions \
             SET amount = ?, currency = ?, type = ?, category = ?, date = COALESCE(?, date), description = ? \
             WHERE id = ? RETURNING {TRANSACTION_COLUMNS}"
        );

        let row: Option<DbTransaction> = sqlx::query_as(&sql)
            .bind(req.amount)
            .bind(req.currency.as_str())
            .bind(req.kind.as_str())
            .bind(&req.category)
            .bind(req.date)
            .bind(&req.description)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbTransaction::into_domain).transpose()
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<bool, RepoError> {
        let result = sqlx::query(r#"DELETE FROM transactions WHERE id = ?"#)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
