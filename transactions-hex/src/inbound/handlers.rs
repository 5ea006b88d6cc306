//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequest, Path, Query, Request, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use transactions_types::{
    AppError, CommissionRequest, CreateTransactionRequest, CreatedResponse, Currency,
    ExchangeRateProvider, GetTransactionQuery, ListTransactionsQuery, TransactionId,
    TransactionRepository, UpdateTransactionRequest, UserId,
};

use crate::TransactionService;

/// Application state shared across handlers.
pub struct AppState<R: TransactionRepository, P: ExchangeRateProvider> {
    pub service: TransactionService<R, P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::RateUnavailable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        }

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

/// JSON body extractor whose rejections use the API error envelope.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

fn parse_transaction_id(raw: &str) -> Result<TransactionId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid transaction ID".into()))
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

/// Record a new transaction.
#[tracing::instrument(skip(state), fields(user_id = %req.user_id, amount = req.amount))]
pub async fn create_transaction<R: TransactionRepository, P: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    ApiJson(req): ApiJson<CreateTransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state.service.create_transaction(req).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: tx.id })))
}

/// List a user's transactions.
#[tracing::instrument(skip(state))]
pub async fn list_transactions<R: TransactionRepository, P: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let raw = query
        .user_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("User ID is required".into()))?;
    let user_id: UserId = raw
        .parse()
        .map_err(|_| AppError::BadRequest("User ID must be an integer".into()))?;

    let transactions = state.service.list_transactions(user_id).await?;
    Ok(Json(transactions))
}

/// Get a transaction, optionally converted to another currency.
#[tracing::instrument(skip(state), fields(transaction_id = %id))]
pub async fn get_transaction<R: TransactionRepository, P: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    Path(id): Path<String>,
    Query(query): Query<GetTransactionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_transaction_id(&id)?;

    let tx = match query.currency.filter(|s| !s.is_empty()) {
        Some(code) => {
            let target = Currency::new(&code).map_err(AppError::from)?;
            state.service.get_transaction_in(id, &target).await?
        }
        None => state.service.get_transaction(id).await?,
    };

    Ok(Json(tx))
}

/// Replace the mutable fields of a transaction.
#[tracing::instrument(skip(state), fields(transaction_id = %id))]
pub async fn update_transaction<R: TransactionRepository, P: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateTransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_transaction_id(&id)?;
    let tx = state.service.update_transaction(id, req).await?;
    Ok(Json(tx))
}

/// Delete a transaction.
#[tracing::instrument(skip(state), fields(transaction_id = %id))]
pub async fn delete_transaction<R: TransactionRepository, P: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_transaction_id(&id)?;
    state.service.delete_transaction(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─────────────────────────────────────────────────────────────────────────────
// Commission
// ─────────────────────────────────────────────────────────────────────────────

/// Commission owed on a stored transaction.
#[tracing::instrument(skip(state), fields(transaction_id = %id))]
pub async fn transaction_commission<R: TransactionRepository, P: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_transaction_id(&id)?;
    let record = state.service.commission_for(id).await?;
    Ok(Json(record))
}

/// Commission owed on a posted transaction payload.
#[tracing::instrument(skip(state), fields(transaction_id = %req.id, kind = %req.kind))]
pub async fn calculate_commission<R: TransactionRepository, P: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    ApiJson(req): ApiJson<CommissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !req.amount.is_finite() {
        return Err(AppError::BadRequest("Amount must be a finite number".into()).into());
    }
    Ok(Json(state.service.calculate_commission(&req)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Documentation
// ─────────────────────────────────────────────────────────────────────────────

/// Serve the generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    use utoipa::OpenApi;
    Json(crate::openapi::ApiDoc::openapi())
}
