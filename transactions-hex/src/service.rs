//! Transaction Application Service
//!
//! Orchestrates domain operations through the repository and exchange-rate
//! ports. Contains NO infrastructure logic - pure business orchestration.

use transactions_types::{
    AppError, CommissionRecord, CommissionRequest, CreateTransactionRequest, Currency,
    DomainError, ExchangeRateProvider, Transaction, TransactionId, TransactionRepository,
    UpdateTransactionRequest, UserId, domain::commission,
};

/// Application service for transaction operations.
///
/// Generic over the repository and the rate provider; both adapters are
/// injected at compile time, so tests can swap in in-memory doubles.
pub struct TransactionService<R: TransactionRepository, P: ExchangeRateProvider> {
    repo: R,
    rates: P,
}

fn validate_amount(amount: f64) -> Result<(), AppError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(DomainError::InvalidAmount.into());
    }
    Ok(())
}

impl<R: TransactionRepository, P: ExchangeRateProvider> TransactionService<R, P> {
    /// Creates a new service over the given adapters.
    pub fn new(repo: R, rates: P) -> Self {
        Self { repo, rates }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the rate provider.
    pub fn rates(&self) -> &P {
        &self.rates
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transaction Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records a new transaction.
    pub async fn create_transaction(
        &self,
        req: CreateTransactionRequest,
    ) -> Result<Transaction, AppError> {
        if req.user_id.get() <= 0 {
            return Err(AppError::BadRequest("User ID must be positive".into()));
        }
        validate_amount(req.amount)?;

        let tx = self.repo.create_transaction(req).await?;
        tracing::info!(transaction_id = %tx.id, user_id = %tx.user_id, "Transaction recorded");
        Ok(tx)
    }

    /// Lists a user's transactions.
    pub async fn list_transactions(&self, user_id: UserId) -> Result<Vec<Transaction>, AppError> {
        self.repo
            .list_transactions_for_user(user_id)
            .await
            .map_err(Into::into)
    }

    /// Gets a transaction by ID.
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, AppError> {
        self.repo
            .get_transaction(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::transaction_not_found(id)))
    }

    /// Gets a transaction with its amount expressed in `target`.
    ///
    /// Looks up a live rate only when `target` differs from the stored currency.
    pub async fn get_transaction_in(
        &self,
        id: TransactionId,
        target: &Currency,
    ) -> Result<Transaction, AppError> {
        let tx = self.get_transaction(id).await?;
        if &tx.currency == target {
            return Ok(tx);
        }

        let rate = self.rates.get_rate(&tx.currency, target).await?;
        tracing::info!(
            transaction_id = %id,
            from = %tx.currency,
            to = %target,
            rate,
            "Converted transaction amount"
        );

        Ok(tx.converted(rate, target.clone()))
    }

    /// Replaces the mutable fields of a transaction.
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        req: UpdateTransactionRequest,
    ) -> Result<Transaction, AppError> {
        validate_amount(req.amount)?;

        self.repo
            .update_transaction(id, req)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::transaction_not_found(id)))
    }

    /// Deletes a transaction.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), AppError> {
        if self.repo.delete_transaction(id).await? {
            Ok(())
        } else {
            Err(AppError::transaction_not_found(id))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Commission
    // ─────────────────────────────────────────────────────────────────────────────

    /// Calculates the commission for an ad-hoc transaction payload.
    pub fn calculate_commission(&self, req: &CommissionRequest) -> CommissionRecord {
        commission::calculate(req)
    }

    /// Calculates the commission for a stored transaction.
    pub async fn commission_for(&self, id: TransactionId) -> Result<CommissionRecord, AppError> {
        let tx = self.get_transaction(id).await?;
        Ok(commission::calculate(&CommissionRequest::from(&tx)))
    }
}
