//! Client example demonstrating a full transaction flow against a running server.
//!
//! Run with: cargo run -p transactions-app --example client_example --no-default-features --features sqlite
//!
//! Set `CURRENCY_API_KEY` to also see a live currency conversion.

use std::net::SocketAddr;
use std::time::Duration;

use exchange_rates::FreeCurrencyApi;
use tempfile::tempdir;
use tokio::net::TcpListener;
use transactions_client::TransactionsClient;
use transactions_hex::{TransactionService, inbound::HttpServer};
use transactions_repo::build_repo;
use transactions_types::{
    CreateTransactionRequest, Currency, TransactionKind, UpdateTransactionRequest, UserId,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("transactions.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    let repo = build_repo(&db_url).await?;
    let api_key = std::env::var("CURRENCY_API_KEY").unwrap_or_default();
    let rates = FreeCurrencyApi::new(api_key.clone(), Duration::from_secs(10))?;

    // Start server in background
    let router = HttpServer::new(TransactionService::new(repo, rates)).router();
    let server_addr = format!("127.0.0.1:{port}");
    tokio::spawn(async move {
        let listener = match TcpListener::bind(&server_addr).await {
            Ok(listener) => listener,
            Err(e) => {
                eprintln!("bind failed: {e}");
                return;
            }
        };
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(500)).await;

    let client = TransactionsClient::new(format!("http://127.0.0.1:{port}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: record, inspect, charge, edit, delete
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let alice = UserId::new(1);
    let transfer = CreateTransactionRequest {
        user_id: alice,
        amount: 250.0,
        currency: Currency::usd(),
        kind: TransactionKind::Transfer,
        category: Some("rent".into()),
        date: None,
        description: "March rent".into(),
    };
    let transfer_id = client.create_transaction(&transfer).await?;
    println!("✅ Recorded transfer (id={transfer_id})");

    let purchase_id = client
        .create_transaction(&CreateTransactionRequest {
            amount: 4000.0,
            currency: Currency::rub(),
            kind: TransactionKind::Purchase,
            category: Some("groceries".into()),
            description: "Weekly shop".into(),
            ..transfer.clone()
        })
        .await?;
    println!("✅ Recorded purchase (id={purchase_id})");

    let commission = client.transaction_commission(transfer_id).await?;
    println!(
        "💸 Commission on transfer: {:.2} {}",
        commission.commission_amount, commission.currency
    );

    let updated = client
        .update_transaction(
            purchase_id,
            &UpdateTransactionRequest {
                amount: 3500.0,
                currency: Currency::rub(),
                kind: TransactionKind::Transfer,
                category: Some("family".into()),
                date: None,
                description: "Sent to parents".into(),
            },
        )
        .await?;
    println!("✏️  Updated transaction {} to a {}", updated.id, updated.kind);

    let commission = client.transaction_commission(purchase_id).await?;
    println!(
        "💸 Commission now: {:.2} {}",
        commission.commission_amount, commission.currency
    );

    if !api_key.is_empty() {
        let eur = Currency::new("EUR")?;
        let converted = client.get_transaction(transfer_id, Some(&eur)).await?;
        println!("💱 Transfer in EUR: {:.2}", converted.amount);
    }

    println!("\n📋 Alice's transactions:");
    for tx in client.list_transactions(alice).await? {
        println!("   - #{} {} {:.2} {}", tx.id, tx.kind, tx.amount, tx.currency);
    }

    client.delete_transaction(transfer_id).await?;
    println!("🗑️  Deleted transaction {transfer_id}");

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
