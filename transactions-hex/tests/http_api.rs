//! Integration tests for the HTTP adapter.
//!
//! Drives the full router against an in-memory SQLite repository and a
//! canned rate provider.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use transactions_hex::{TransactionService, inbound::HttpServer};
use transactions_repo::SqliteRepo;
use transactions_types::{Currency, ExchangeError, ExchangeRateProvider};

/// Knows a single EUR rate; fails every other pair.
struct EurOnlyRates;

#[async_trait]
impl ExchangeRateProvider for EurOnlyRates {
    async fn get_rate(&self, from: &Currency, to: &Currency) -> Result<f64, ExchangeError> {
        match to.as_str() {
            "EUR" => Ok(0.9),
            "JPY" => Err(ExchangeError::Transport("connection refused".into())),
            _ => Err(ExchangeError::RateNotFound {
                from: from.clone(),
                to: to.clone(),
            }),
        }
    }
}

async fn create_app() -> Router {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    HttpServer::new(TransactionService::new(repo, EurOnlyRates)).router()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn create_transaction(app: &Router, body: Value) -> i64 {
    let (status, json) = send(app, with_json(Method::POST, "/transactions", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_i64().unwrap()
}

fn transfer(user_id: i64, amount: f64, currency: &str) -> Value {
    json!({
        "user_id": user_id,
        "amount": amount,
        "currency": currency,
        "type": "transfer",
        "description": "rent"
    })
}

#[tokio::test]
async fn test_health() {
    let app = create_app().await;

    let (status, json) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_create_then_get() {
    let app = create_app().await;
    let id = create_transaction(&app, transfer(1, 100.0, "USD")).await;

    let (status, json) = send(&app, get(&format!("/transactions/{id}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], id);
    assert_eq!(json["user_id"], 1);
    assert_eq!(json["amount"], 100.0);
    assert_eq!(json["currency"], "USD");
    assert_eq!(json["type"], "transfer");
    assert_eq!(json["description"], "rent");
}

#[tokio::test]
async fn test_create_with_bad_currency_is_rejected() {
    let app = create_app().await;

    let (status, json) = send(
        &app,
        with_json(Method::POST, "/transactions", transfer(1, 100.0, "DOLLARS")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], 400);
    assert!(json["error"].as_str().unwrap().contains("DOLLARS"));
}

#[tokio::test]
async fn test_malformed_bodies_use_error_envelope() {
    let app = create_app().await;

    let (status, json) = send(
        &app,
        with_json(
            Method::POST,
            "/commission",
            json!({ "amount": "abc", "currency": "USD", "type": "transfer" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], 400);

    let not_json = Request::builder()
        .method(Method::POST)
        .uri("/commission")
        .header("Content-Type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let (status, json) = send(&app, not_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], 400);
    assert!(json["error"].is_string());

    let (status, json) = send(
        &app,
        with_json(
            Method::PUT,
            "/transactions/1",
            json!({ "amount": 1.0, "currency": "USD" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], 400);
}

#[tokio::test]
async fn test_list_requires_user_id() {
    let app = create_app().await;

    let (status, json) = send(&app, get("/transactions")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "User ID is required");
    assert_eq!(json["code"], 400);

    let (status, json) = send(&app, get("/transactions?user_id=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "User ID must be an integer");
}

#[tokio::test]
async fn test_list_returns_only_users_transactions() {
    let app = create_app().await;
    create_transaction(&app, transfer(1, 10.0, "USD")).await;
    create_transaction(&app, transfer(1, 20.0, "USD")).await;
    create_transaction(&app, transfer(2, 30.0, "USD")).await;

    let (status, json) = send(&app, get("/transactions?user_id=1")).await;

    assert_eq!(status, StatusCode::OK);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|tx| tx["user_id"] == 1));
}

#[tokio::test]
async fn test_get_invalid_and_missing_ids() {
    let app = create_app().await;

    let (status, json) = send(&app, get("/transactions/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid transaction ID");

    let (status, json) = send(&app, get("/transactions/404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], 404);
}

#[tokio::test]
async fn test_get_converted_amount() {
    let app = create_app().await;
    let id = create_transaction(&app, transfer(1, 100.0, "USD")).await;

    let (status, json) = send(&app, get(&format!("/transactions/{id}?currency=EUR"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["currency"], "EUR");
    assert!((json["amount"].as_f64().unwrap() - 90.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_get_in_same_currency_is_unchanged() {
    let app = create_app().await;
    let id = create_transaction(&app, transfer(1, 100.0, "USD")).await;

    let (status, json) = send(&app, get(&format!("/transactions/{id}?currency=usd"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["currency"], "USD");
    assert_eq!(json["amount"], 100.0);
}

#[tokio::test]
async fn test_conversion_failures_map_to_distinct_statuses() {
    let app = create_app().await;
    let id = create_transaction(&app, transfer(1, 100.0, "USD")).await;

    let (status, json) = send(&app, get(&format!("/transactions/{id}?currency=GBP"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], 422);

    let (status, json) = send(&app, get(&format!("/transactions/{id}?currency=JPY"))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], 502);

    let (status, _) = send(&app, get(&format!("/transactions/{id}?currency=EURO"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_transaction() {
    let app = create_app().await;
    let id = create_transaction(&app, transfer(1, 100.0, "USD")).await;

    let (status, json) = send(
        &app,
        with_json(
            Method::PUT,
            &format!("/transactions/{id}"),
            json!({
                "amount": 75.5,
                "currency": "RUB",
                "type": "purchase",
                "category": "food",
                "description": "groceries"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["amount"], 75.5);
    assert_eq!(json["currency"], "RUB");
    assert_eq!(json["type"], "purchase");
    assert_eq!(json["category"], "food");

    let (status, _) = send(
        &app,
        with_json(
            Method::PUT,
            "/transactions/999",
            json!({ "amount": 1.0, "currency": "USD", "type": "deposit" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_transaction() {
    let app = create_app().await;
    let id = create_transaction(&app, transfer(1, 100.0, "USD")).await;
    let uri = format!("/transactions/{id}");

    let delete = || {
        Request::builder()
            .method(Method::DELETE)
            .uri(&uri)
            .body(Body::empty())
            .unwrap()
    };

    let (status, _) = send(&app, delete()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, delete()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stored_transaction_commission() {
    let app = create_app().await;
    let id = create_transaction(&app, transfer(1, 100.0, "USD")).await;

    let (status, json) = send(&app, get(&format!("/transactions/{id}/commission"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["transaction_id"], id);
    assert_eq!(json["transaction_amount"], 100.0);
    assert_eq!(json["currency"], "USD");
    assert_eq!(json["transaction_type"], "transfer");
    assert_eq!(json["commission_amount"], 2.0);
    assert_eq!(json["description"], "Calculated commission");
}

#[tokio::test]
async fn test_posted_commission() {
    let app = create_app().await;

    let (status, json) = send(
        &app,
        with_json(
            Method::POST,
            "/commission",
            json!({ "id": 9, "amount": 100.0, "currency": "EUR", "type": "transfer" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["transaction_id"], 9);
    assert_eq!(json["commission_amount"], 1.0);

    let (status, json) = send(
        &app,
        with_json(
            Method::POST,
            "/commission",
            json!({ "amount": 100.0, "currency": "USD", "type": "deposit" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["transaction_id"], 0);
    assert_eq!(json["commission_amount"], 0.0);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = create_app().await;

    let (status, json) = send(&app, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["info"]["title"], "Transactions Service API");
    assert!(json["paths"]["/transactions/{id}/commission"].is_object());
}
