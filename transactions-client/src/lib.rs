//! # Transactions Client SDK
//!
//! A typed Rust client for the Transactions API.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use transactions_types::{
    CommissionRecord, CommissionRequest, CreateTransactionRequest, CreatedResponse, Currency,
    Transaction, TransactionId, UpdateTransactionRequest, UserId,
};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transactions API client.
pub struct TransactionsClient {
    base_url: String,
    http: Client,
}

impl TransactionsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transactions
    // ─────────────────────────────────────────────────────────────────────────

    /// Records a transaction and returns its ID.
    pub async fn create_transaction(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<TransactionId, ClientError> {
        let created: CreatedResponse = self
            .send(self.http.post(self.url("/transactions")).json(req))
            .await?;
        Ok(created.id)
    }

    /// Lists a user's transactions.
    pub async fn list_transactions(&self, user_id: UserId) -> Result<Vec<Transaction>, ClientError> {
        let req = self
            .http
            .get(self.url("/transactions"))
            .query(&[("user_id", user_id.get())]);
        self.send(req).await
    }

    /// Gets a transaction, converted to `currency` when given.
    pub async fn get_transaction(
        &self,
        id: TransactionId,
        currency: Option<&Currency>,
    ) -> Result<Transaction, ClientError> {
        let mut req = self.http.get(self.url(&format!("/transactions/{}", id)));
        if let Some(currency) = currency {
            req = req.query(&[("currency", currency.as_str())]);
        }
        self.send(req).await
    }

    /// Replaces the mutable fields of a transaction.
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        req: &UpdateTransactionRequest,
    ) -> Result<Transaction, ClientError> {
        self.send(
            self.http
                .put(self.url(&format!("/transactions/{}", id)))
                .json(req),
        )
        .await
    }

    /// Deletes a transaction.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/transactions/{}", id)))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(api_error(resp).await)
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commission
    // ─────────────────────────────────────────────────────────────────────────

    /// Commission owed on a stored transaction.
    pub async fn transaction_commission(
        &self,
        id: TransactionId,
    ) -> Result<CommissionRecord, ClientError> {
        self.send(
            self.http
                .get(self.url(&format!("/transactions/{}/commission", id))),
        )
        .await
    }

    /// Commission owed on an arbitrary transaction payload.
    pub async fn calculate_commission(
        &self,
        req: &CommissionRequest,
    ) -> Result<CommissionRecord, ClientError> {
        self.send(self.http.post(self.url("/commission")).json(req))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        if resp.status().is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(resp).await)
        }
    }
}

/// Turns a non-success response into `ClientError::Api`, preferring the
/// server's `error` field over the raw body.
async fn api_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body);
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        extract::{Path, Query},
        http::StatusCode,
        routing::{get, post},
    };
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use transactions_types::TransactionKind;

    use super::*;

    /// Serves canned answers shaped like the real API.
    async fn spawn_api() -> String {
        let app = Router::new()
            .route(
                "/transactions",
                post(|| async { (StatusCode::CREATED, Json(json!({ "id": 5 }))) }).get(
                    |Query(q): Query<HashMap<String, String>>| async move {
                        let user_id: i64 = q["user_id"].parse().unwrap_or_default();
                        Json(json!([{
                            "id": 1,
                            "user_id": user_id,
                            "amount": 10.0,
                            "currency": "USD",
                            "type": "deposit",
                            "date": "2024-01-01T00:00:00Z",
                            "description": ""
                        }]))
                    },
                ),
            )
            .route(
                "/transactions/{id}",
                get(
                    |Path(id): Path<i64>, Query(q): Query<HashMap<String, String>>| async move {
                        let currency = q.get("currency").cloned().unwrap_or("USD".into());
                        Json(json!({
                            "id": id,
                            "user_id": 1,
                            "amount": 10.0,
                            "currency": currency,
                            "type": "transfer",
                            "date": "2024-01-01T00:00:00Z",
                            "description": ""
                        }))
                    },
                )
                .delete(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({ "error": "Transaction 9 not found", "code": 404 })),
                    )
                }),
            )
            .route(
                "/commission",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({
                        "transaction_id": body["id"],
                        "transaction_amount": body["amount"],
                        "currency": body["currency"],
                        "transaction_type": body["type"],
                        "commission_amount": 2.0,
                        "date": "2024-01-01T00:00:00Z",
                        "description": "Calculated commission"
                    }))
                }),
            )
            .route("/health", get(|| async { Json(json!({ "status": "healthy" })) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_client_creation() {
        let client = TransactionsClient::new("http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = TransactionsClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_health_and_create() {
        let client = TransactionsClient::new(spawn_api().await);

        assert!(client.health().await.unwrap());

        let id = client
            .create_transaction(&CreateTransactionRequest {
                user_id: UserId::new(1),
                amount: 10.0,
                currency: Currency::usd(),
                kind: TransactionKind::Deposit,
                category: None,
                date: None,
                description: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(id, TransactionId::new(5));
    }

    #[tokio::test]
    async fn test_list_and_get_pass_query_parameters() {
        let client = TransactionsClient::new(spawn_api().await);

        let list = client.list_transactions(UserId::new(3)).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].user_id, UserId::new(3));

        let eur = Currency::new("EUR").unwrap();
        let tx = client
            .get_transaction(TransactionId::new(4), Some(&eur))
            .await
            .unwrap();
        assert_eq!(tx.id, TransactionId::new(4));
        assert_eq!(tx.currency, eur);
    }

    #[tokio::test]
    async fn test_calculate_commission() {
        let client = TransactionsClient::new(spawn_api().await);

        let record = client
            .calculate_commission(&CommissionRequest {
                id: TransactionId::new(8),
                amount: 100.0,
                currency: Currency::usd(),
                kind: TransactionKind::Transfer,
            })
            .await
            .unwrap();

        assert_eq!(record.transaction_id, TransactionId::new(8));
        assert_eq!(record.commission_amount, 2.0);
    }

    #[tokio::test]
    async fn test_api_error_carries_server_message() {
        let client = TransactionsClient::new(spawn_api().await);

        let err = client
            .delete_transaction(TransactionId::new(9))
            .await
            .unwrap_err();

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Transaction 9 not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
