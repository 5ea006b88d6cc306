//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use transactions_types::{ExchangeRateProvider, TransactionRepository};

use super::handlers::{self, AppState};
use crate::TransactionService;

/// HTTP Server for the Transactions API.
pub struct HttpServer<R: TransactionRepository, P: ExchangeRateProvider> {
    state: Arc<AppState<R, P>>,
}

impl<R: TransactionRepository, P: ExchangeRateProvider> HttpServer<R, P> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: TransactionService<R, P>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/transactions",
                get(handlers::list_transactions::<R, P>)
                    .post(handlers::create_transaction::<R, P>),
            )
            .route(
                "/transactions/{id}",
                get(handlers::get_transaction::<R, P>)
                    .put(handlers::update_transaction::<R, P>)
                    .delete(handlers::delete_transaction::<R, P>),
            )
            .route(
                "/transactions/{id}/commission",
                get(handlers::transaction_commission::<R, P>),
            )
            .route("/commission", post(handlers::calculate_commission::<R, P>))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
