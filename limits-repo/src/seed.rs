//! Loading rule sets and ledgers from JSON documents.
//!
//! A rule set document looks like:
//!
//! ```json
//! {
//!   "profiles": [
//!     { "id": "standard", "name": "Standard", "min_transaction": 50,
//!       "max_transaction": 500, "monthly": 2000 }
//!   ],
//!   "configurations": [
//!     { "id": "default", "is_default": true, "priority": 100, "profile_id": "standard" }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use limits_types::{
    ConfigurationSet, DomainError, LedgerEntry, LimitConfiguration, LimitProfile, RepoError,
};

use crate::ledger::InMemoryLedger;
use crate::memory::InMemoryLimitStore;

/// Errors raised while loading seed documents.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: String,
        source: serde_json::Error,
    },

    #[error("Invalid rule set: {0}")]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Administered profiles and configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSetDocument {
    #[serde(default)]
    pub profiles: Vec<LimitProfile>,
    #[serde(default)]
    pub configurations: Vec<LimitConfiguration>,
}

impl RuleSetDocument {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        serde_json::from_str(json).map_err(|source| SeedError::Parse {
            what: "rule set".into(),
            source,
        })
    }

    /// Checks every profile, the single-default rule, and that every
    /// configuration points at a known profile.
    pub fn validate(&self) -> Result<ConfigurationSet, DomainError> {
        let mut profile_ids = HashSet::new();
        for profile in &self.profiles {
            profile.validate()?;
            if !profile_ids.insert(&profile.id) {
                return Err(DomainError::ValidationError(format!(
                    "Duplicate limit profile id: {}",
                    profile.id
                )));
            }
        }

        let mut configuration_ids = HashSet::new();
        for configuration in &self.configurations {
            if !configuration_ids.insert(&configuration.id) {
                return Err(DomainError::ValidationError(format!(
                    "Duplicate limit configuration id: {}",
                    configuration.id
                )));
            }
            if !profile_ids.contains(&configuration.profile_id) {
                return Err(DomainError::ProfileNotFound(configuration.profile_id.clone()));
            }
        }

        ConfigurationSet::from_configurations(self.configurations.clone())
    }

    /// Validates the document and loads it into a fresh store.
    pub fn into_store(self) -> Result<InMemoryLimitStore, SeedError> {
        self.validate()?;

        let store = InMemoryLimitStore::new();
        for profile in self.profiles {
            store.upsert_profile(profile)?;
        }
        for configuration in self.configurations {
            store.add_configuration(configuration)?;
        }

        Ok(store)
    }
}

/// Recorded transactions to aggregate usage from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerDocument {
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
}

impl LedgerDocument {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        serde_json::from_str(json).map_err(|source| SeedError::Parse {
            what: "ledger".into(),
            source,
        })
    }

    /// Records every entry into `ledger`.
    pub fn load_into(self, ledger: &InMemoryLedger) {
        for entry in self.entries {
            ledger.record(entry);
        }
    }
}

/// Reads and validates a rule set file.
pub async fn load_rule_set(path: &Path) -> Result<InMemoryLimitStore, SeedError> {
    let json = read(path).await?;
    let store = RuleSetDocument::from_json(&json)?.into_store()?;

    tracing::info!(
        path = %path.display(),
        profiles = store.profile_count(),
        "Loaded limit rule set"
    );
    Ok(store)
}

/// Reads a ledger file into a ledger using the system clock.
pub async fn load_ledger(path: &Path) -> Result<InMemoryLedger, SeedError> {
    let json = read(path).await?;
    let ledger = InMemoryLedger::new();
    LedgerDocument::from_json(&json)?.load_into(&ledger);

    tracing::info!(
        path = %path.display(),
        entries = ledger.entry_count(),
        "Loaded transaction ledger"
    );
    Ok(ledger)
}

async fn read(path: &Path) -> Result<String, SeedError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })
}
