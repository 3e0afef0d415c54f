//! # Limits Repository
//!
//! Concrete adapters for the limits engine ports.
//! This crate provides in-memory implementations of the configuration,
//! profile and usage ports, plus loaders that populate them from JSON.

use std::path::Path;

pub mod ledger;
pub mod memory;
pub mod seed;


pub use ledger::InMemoryLedger;
pub use memory::InMemoryLimitStore;
pub use seed::{LedgerDocument, RuleSetDocument, SeedError};

/// Rule store and ledger built together from seed files.
#[derive(Clone)]
pub struct Repo {
    /// Serves both the configuration and the profile port
    pub store: InMemoryLimitStore,
    /// Serves the usage port
    pub ledger: InMemoryLedger,
}

/// Build a repository from a rule set file and an optional ledger file.
///
/// This function:
/// 1. Reads and validates the rule set
/// 2. Reads the ledger, or starts from an empty one
/// 3. Returns a ready-to-use `Repo`
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo(Path::new("rules.json"), Some(Path::new("ledger.json"))).await?;
/// let service = LimitsService::new(repo.store.clone(), repo.store, repo.ledger);
/// ```
pub async fn build_repo(rules_path: &Path, ledger_path: Option<&Path>) -> anyhow::Result<Repo> {
    let store = seed::load_rule_set(rules_path).await?;
    let ledger = match ledger_path {
        Some(path) => seed::load_ledger(path).await?,
        None => {
            tracing::warn!("No ledger configured, all usage totals start at zero");
            InMemoryLedger::new()
        }
    };

    Ok(Repo { store, ledger })
}
