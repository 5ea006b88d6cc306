//! Transactions CLI
//!
//! Command-line interface for the Transactions API.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use transactions_client::TransactionsClient;
use transactions_types::{
    CommissionRequest, CreateTransactionRequest, Currency, TransactionId, TransactionKind,
    UpdateTransactionRequest, UserId,
};

#[derive(Parser)]
#[command(name = "transactions")]
#[command(author, version, about = "Transactions API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Transactions API
    #[arg(
        long,
        env = "TRANSACTIONS_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction operations
    Tx {
        #[command(subcommand)]
        action: TxCommands,
    },
    /// Commission calculation
    Commission {
        #[command(subcommand)]
        action: CommissionCommands,
    },
    /// Check API health
    Health,
}

/// Fields shared by `tx create` and `tx update`.
#[derive(Args)]
struct TxFields {
    #[arg(long)]
    amount: f64,
    /// Three-letter currency code
    #[arg(long, default_value = "USD")]
    currency: Currency,
    /// transfer, purchase, deposit or any other tag
    #[arg(long = "type")]
    kind: String,
    #[arg(long)]
    category: Option<String>,
    /// RFC 3339 timestamp
    #[arg(long)]
    date: Option<DateTime<Utc>>,
    #[arg(long, default_value = "")]
    description: String,
}

#[derive(Subcommand)]
enum TxCommands {
    /// Record a transaction
    Create {
        #[arg(long)]
        user: i64,
        #[command(flatten)]
        fields: TxFields,
    },
    /// List a user's transactions
    List {
        #[arg(long)]
        user: i64,
    },
    /// Show a transaction
    Get {
        id: TransactionId,
        /// Convert the amount to this currency
        #[arg(long)]
        currency: Option<Currency>,
    },
    /// Replace a transaction's fields
    Update {
        id: TransactionId,
        #[command(flatten)]
        fields: TxFields,
    },
    /// Delete a transaction
    Delete { id: TransactionId },
}

#[derive(Subcommand)]
enum CommissionCommands {
    /// Commission for an ad-hoc transaction
    Calc {
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value = "USD")]
        currency: Currency,
        #[arg(long = "type")]
        kind: String,
    },
    /// Commission for a stored transaction
    Show { id: TransactionId },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = TransactionsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Tx { action } => match action {
            TxCommands::Create { user, fields } => {
                let req = CreateTransactionRequest {
                    user_id: UserId::new(user),
                    amount: fields.amount,
                    currency: fields.currency,
                    kind: TransactionKind::from(fields.kind),
                    category: fields.category,
                    date: fields.date,
                    description: fields.description,
                };
                let id = client.create_transaction(&req).await?;
                println!("✓ Transaction {} recorded", id);
            }
            TxCommands::List { user } => {
                let transactions = client.list_transactions(UserId::new(user)).await?;
                print_json(&transactions)?;
            }
            TxCommands::Get { id, currency } => {
                let tx = client.get_transaction(id, currency.as_ref()).await?;
                print_json(&tx)?;
            }
            TxCommands::Update { id, fields } => {
                let req = UpdateTransactionRequest {
                    amount: fields.amount,
                    currency: fields.currency,
                    kind: TransactionKind::from(fields.kind),
                    category: fields.category,
                    date: fields.date,
                    description: fields.description,
                };
                let tx = client.update_transaction(id, &req).await?;
                print_json(&tx)?;
            }
            TxCommands::Delete { id } => {
                client.delete_transaction(id).await?;
                println!("✓ Transaction {} deleted", id);
            }
        },

        Commands::Commission { action } => match action {
            CommissionCommands::Calc {
                amount,
                currency,
                kind,
            } => {
                let req = CommissionRequest {
                    id: TransactionId::default(),
                    amount,
                    currency,
                    kind: TransactionKind::from(kind),
                };
                let record = client.calculate_commission(&req).await?;
                print_json(&record)?;
            }
            CommissionCommands::Show { id } => {
                let record = client.transaction_commission(id).await?;
                print_json(&record)?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tx_create() {
        let cli = Cli::try_parse_from([
            "transactions",
            "--api-url",
            "http://example.test",
            "tx",
            "create",
            "--user",
            "7",
            "--amount",
            "12.5",
            "--currency",
            "rub",
            "--type",
            "transfer",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://example.test");
        match cli.command {
            Commands::Tx {
                action: TxCommands::Create { user, fields },
            } => {
                assert_eq!(user, 7);
                assert_eq!(fields.amount, 12.5);
                assert_eq!(fields.currency, Currency::rub());
                assert_eq!(fields.kind, "transfer");
                assert!(fields.date.is_none());
            }
            _ => panic!("expected tx create"),
        }
    }

    #[test]
    fn test_bad_currency_is_rejected() {
        let result = Cli::try_parse_from(["transactions", "tx", "get", "1", "--currency", "EURO"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_commission_show() {
        let cli = Cli::try_parse_from(["transactions", "commission", "show", "42"]).unwrap();

        assert!(matches!(
            cli.command,
            Commands::Commission {
                action: CommissionCommands::Show { id }
            } if id == TransactionId::new(42)
        ));
    }
}
