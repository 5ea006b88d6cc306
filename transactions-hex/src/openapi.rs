//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use transactions_types::domain::{CommissionRecord, CommissionRequest, Transaction};
use transactions_types::dto::{
    CreateTransactionRequest, CreatedResponse, GetTransactionQuery, ListTransactionsQuery,
    UpdateTransactionRequest,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation.

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Record a transaction
///
/// Unknown users are created with default details.
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = CreatedResponse),
        (status = 400, description = "Invalid request")
    )
)]
async fn create_transaction() {}

/// List a user's transactions
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    params(ListTransactionsQuery),
    responses(
        (status = 200, description = "Transactions ordered by date", body = Vec<Transaction>),
        (status = 400, description = "Missing or non-integer user ID")
    )
)]
async fn list_transactions() {}

/// Get a transaction
///
/// When `currency` differs from the stored currency the amount is converted
/// with a live rate.
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "transactions",
    params(
        ("id" = i64, Path, description = "Transaction ID"),
        GetTransactionQuery
    ),
    responses(
        (status = 200, description = "Transaction found", body = Transaction),
        (status = 400, description = "Invalid transaction ID or currency"),
        (status = 404, description = "Transaction not found"),
        (status = 422, description = "No rate for the currency pair"),
        (status = 502, description = "Rate provider unreachable or malformed")
    )
)]
async fn get_transaction() {}

/// Update a transaction
#[utoipa::path(
    put,
    path = "/transactions/{id}",
    tag = "transactions",
    params(("id" = i64, Path, description = "Transaction ID")),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Transaction updated", body = Transaction),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Transaction not found")
    )
)]
async fn update_transaction() {}

/// Delete a transaction
#[utoipa::path(
    delete,
    path = "/transactions/{id}",
    tag = "transactions",
    params(("id" = i64, Path, description = "Transaction ID")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found")
    )
)]
async fn delete_transaction() {}

/// Commission on a stored transaction
#[utoipa::path(
    get,
    path = "/transactions/{id}/commission",
    tag = "commission",
    params(("id" = i64, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Commission calculated", body = CommissionRecord),
        (status = 404, description = "Transaction not found")
    )
)]
async fn transaction_commission() {}

/// Commission on a posted transaction
#[utoipa::path(
    post,
    path = "/commission",
    tag = "commission",
    request_body = CommissionRequest,
    responses(
        (status = 200, description = "Commission calculated", body = CommissionRecord),
        (status = 400, description = "Invalid request")
    )
)]
async fn calculate_commission() {}

/// OpenAPI documentation for the Transactions API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Transactions Service API",
        version = "1.0.0",
        description = "Records user transactions, converts amounts between currencies and calculates commissions.\n\n## Commission\n\n| type | currency | rate |\n|------|----------|------|\n| transfer | USD | 2% |\n| transfer | RUB | 5% |\n| transfer | other | 1% |\n| purchase, deposit | any | 0 |",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_transaction,
        list_transactions,
        get_transaction,
        update_transaction,
        delete_transaction,
        transaction_commission,
        calculate_commission,
    ),
    components(
        schemas(
            Transaction,
            CreateTransactionRequest,
            UpdateTransactionRequest,
            CreatedResponse,
            CommissionRequest,
            CommissionRecord,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "transactions", description = "Transaction bookkeeping"),
        (name = "commission", description = "Commission calculation"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/health",
            "/transactions",
            "/transactions/{id}",
            "/transactions/{id}/commission",
            "/commission",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
