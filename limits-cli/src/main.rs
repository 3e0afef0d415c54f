//! Limits CLI
//!
//! Command-line interface for the transaction limits engine.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use limits_hex::LimitsService;
use limits_repo::{InMemoryLedger, InMemoryLimitStore, build_repo};
use limits_types::{
    AccountId, Amount, CheckTransactionRequest, CheckTransactionResult,
    LimitConfigurationRepository, LimitsQuery, PaymentMethodType, TransactionType,
};

type Service = LimitsService<InMemoryLimitStore, InMemoryLimitStore, InMemoryLedger>;

/// Process exit status for a transaction the limits do not allow.
const DENIED_EXIT_STATUS: u8 = 2;

#[derive(Parser)]
#[command(name = "limits")]
#[command(author, version, about = "Transaction limits engine CLI", long_about = None)]
struct Cli {
    /// Path to the rule set JSON file [env: LIMITS_RULES_PATH]
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Path to the ledger JSON file [env: LIMITS_LEDGER_PATH]
    #[arg(long)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a transaction is within the account's limits
    Check(CheckArgs),
    /// Show the limits summary with current usage
    Limits {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Show the resolved limit profile
    Profile {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Validate the rule set and print a short report
    Validate,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Account ID (UUID)
    #[arg(long)]
    account: String,
    /// Transaction amount in major units, e.g. 125.50
    #[arg(long)]
    amount: String,
    /// DEPOSIT, WITHDRAWAL, TRANSFER or CARD_PAYMENT
    #[arg(long)]
    transaction_type: Option<String>,
    /// CARD, ACH or WALLET
    #[arg(long)]
    payment_method: Option<String>,
}

impl CheckArgs {
    fn into_request(self) -> Result<CheckTransactionRequest> {
        Ok(CheckTransactionRequest {
            account_id: parse_account_id(&self.account)?,
            amount: parse_amount(&self.amount)?,
            transaction_type: parse_optional(&self.transaction_type, parse_transaction_type)?,
            payment_method_type: parse_optional(&self.payment_method, parse_payment_method)?,
        })
    }
}

#[derive(clap::Args)]
struct QueryArgs {
    /// Account ID (UUID)
    #[arg(long)]
    account: String,
    #[arg(long)]
    transaction_type: Option<String>,
    #[arg(long)]
    payment_method: Option<String>,
}

impl QueryArgs {
    fn into_query(self) -> Result<LimitsQuery> {
        Ok(LimitsQuery {
            account_id: parse_account_id(&self.account)?,
            transaction_type: parse_optional(&self.transaction_type, parse_transaction_type)?,
            payment_method_type: parse_optional(&self.payment_method, parse_payment_method)?,
        })
    }
}

fn parse_account_id(s: &str) -> Result<AccountId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid account ID: {}", s))
}

fn parse_amount(s: &str) -> Result<Amount> {
    s.parse()
        .map_err(|e| anyhow::anyhow!("Invalid amount {}: {}", s, e))
}

fn parse_transaction_type(s: &str) -> Result<TransactionType> {
    s.parse().map_err(|_| {
        anyhow::anyhow!(
            "Unknown transaction type: {}. Supported: DEPOSIT, WITHDRAWAL, TRANSFER, CARD_PAYMENT",
            s
        )
    })
}

fn parse_payment_method(s: &str) -> Result<PaymentMethodType> {
    s.parse().map_err(|_| {
        anyhow::anyhow!("Unknown payment method: {}. Supported: CARD, ACH, WALLET", s)
    })
}

fn parse_optional<T>(value: &Option<String>, parse: fn(&str) -> Result<T>) -> Result<Option<T>> {
    value.as_deref().map(parse).transpose()
}

async fn run_check(service: &Service, args: CheckArgs) -> Result<CheckTransactionResult> {
    Ok(service.can_make_transaction(args.into_request()?).await?)
}

fn exit_status(result: &CheckTransactionResult) -> u8 {
    if result.status.is_allowed() {
        0
    } else {
        DENIED_EXIT_STATUS
    }
}

async fn validate_report(store: &InMemoryLimitStore) -> Result<String> {
    let configurations = store.get_all_active_configurations().await?;
    Ok(format!(
        "Profiles:       {}\nConfigurations: {}\nDefault:        {}\n✓ Rule set is valid",
        store.profile_count(),
        configurations.count(),
        configurations.default_configuration().id
    ))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,limits_cli=debug,limits_hex=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::Config::from_env(cli.rules, cli.ledger)?;

    tracing::debug!(rules = %config.rules_path.display(), "Loading rule set");
    let repo = build_repo(&config.rules_path, config.ledger_path.as_deref()).await?;

    let store = repo.store;
    let service = LimitsService::new(store.clone(), store.clone(), repo.ledger);

    match cli.command {
        Commands::Check(args) => {
            let result = run_check(&service, args).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(ExitCode::from(exit_status(&result)));
        }

        Commands::Limits { query } => {
            let summary = service.get_consumer_limits(query.into_query()?).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::Profile { query } => {
            let profile = service.get_limits(query.into_query()?).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }

        Commands::Validate => {
            println!("{}", validate_report(&store).await?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use limits_repo::RuleSetDocument;
    use limits_types::CheckTransactionStatus;

    use super::*;

    const RULES: &str = r#"{
        "profiles": [
            { "id": "standard", "name": "Standard", "min_transaction": 50,
              "max_transaction": 500, "monthly": 2000 },
            { "id": "card", "name": "Card", "min_transaction": 5,
              "max_transaction": 250 }
        ],
        "configurations": [
            { "id": "card-rule", "priority": 1, "profile_id": "card",
              "criteria": { "payment_method_type": "CARD" } },
            { "id": "fallback", "is_default": true, "priority": 100,
              "profile_id": "standard" }
        ]
    }"#;

    fn store() -> InMemoryLimitStore {
        RuleSetDocument::from_json(RULES).unwrap().into_store().unwrap()
    }

    fn service() -> Service {
        let store = store();
        LimitsService::new(store.clone(), store, InMemoryLedger::new())
    }

    fn check_args(amount: &str, payment_method: Option<&str>) -> CheckArgs {
        CheckArgs {
            account: AccountId::new().to_string(),
            amount: amount.into(),
            transaction_type: None,
            payment_method: payment_method.map(String::from),
        }
    }

    #[test]
    fn test_parse_check_arguments() {
        let cli = Cli::try_parse_from([
            "limits",
            "--rules",
            "rules.json",
            "check",
            "--account",
            "7c0e3bb4-5a5e-4d8c-9d0f-3f8f1f6f2a11",
            "--amount",
            "125.50",
            "--transaction-type",
            "card_payment",
        ])
        .unwrap();

        assert_eq!(cli.rules, Some(PathBuf::from("rules.json")));
        assert!(cli.ledger.is_none());
        let Commands::Check(args) = cli.command else {
            panic!("expected check command");
        };
        let request = args.into_request().unwrap();
        assert_eq!(request.amount, "125.50".parse::<Amount>().unwrap());
        assert_eq!(request.transaction_type, Some(TransactionType::CardPayment));
        assert!(request.payment_method_type.is_none());
    }

    #[test]
    fn test_rejects_unknown_payment_method() {
        assert!(parse_payment_method("cheque").is_err());
        assert_eq!(parse_payment_method("ach").unwrap(), PaymentMethodType::Ach);
    }

    #[test]
    fn test_rejects_bad_account_id() {
        assert!(parse_account_id("not-a-uuid").is_err());
    }

    #[tokio::test]
    async fn test_allowed_check_exits_cleanly() {
        let result = run_check(&service(), check_args("100", None)).await.unwrap();

        assert_eq!(result.status, CheckTransactionStatus::Allowed);
        assert_eq!(exit_status(&result), 0);
    }

    #[tokio::test]
    async fn test_denied_check_exits_with_status_two() {
        let result = run_check(&service(), check_args("600", None)).await.unwrap();

        assert_eq!(result.status, CheckTransactionStatus::TransactionTooLarge);
        assert_eq!(exit_status(&result), DENIED_EXIT_STATUS);
        assert_eq!(DENIED_EXIT_STATUS, 2);
    }

    #[tokio::test]
    async fn test_check_uses_payment_method_rule() {
        let result = run_check(&service(), check_args("300", Some("card")))
            .await
            .unwrap();

        assert_eq!(result.status, CheckTransactionStatus::TransactionTooLarge);
        assert_eq!(result.range_max, Amount::from_units(250));
    }

    #[tokio::test]
    async fn test_check_rejects_malformed_amount() {
        assert!(run_check(&service(), check_args("-5", None)).await.is_err());
    }

    #[tokio::test]
    async fn test_validate_report() {
        let report = validate_report(&store()).await.unwrap();

        assert_eq!(
            report,
            "Profiles:       2\nConfigurations: 2\nDefault:        fallback\n✓ Rule set is valid"
        );
    }
}
