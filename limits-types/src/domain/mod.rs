//! Domain models for the limits engine.

pub mod account;
pub mod amount;
pub mod configuration;
pub mod profile;
pub mod transaction;
pub mod usage;
pub mod verdict;

pub use account::AccountId;
pub use amount::Amount;
pub use configuration::{
    ConfigurationId, ConfigurationSet, LimitConfiguration, MatchCriteria, TransactionContext,
};
pub use profile::{LimitProfile, ProfileId};
pub use transaction::{EntryStatus, LedgerEntry, PaymentMethodType, TransactionType};
pub use usage::{LimitWindow, UsageSnapshot};
pub use verdict::{CheckTransactionResult, CheckTransactionStatus, LimitsSummary, WindowLimit};
