//! Collaborator ports consumed by the limits engine.
//!
//! Rule sets are administered out-of-band and usage is recorded elsewhere;
//! the engine only reads through these traits.

use crate::domain::{AccountId, Amount, ConfigurationSet, LimitProfile, ProfileId};
use crate::error::RepoError;

/// Source of the active limit configurations.
#[async_trait::async_trait]
pub trait LimitConfigurationRepository: Send + Sync + 'static {
    /// Returns the full active set, fetched fresh on every call.
    ///
    /// Implementations reject sets without exactly one default with
    /// `DomainError::Configuration`.
    async fn get_all_active_configurations(&self) -> Result<ConfigurationSet, RepoError>;
}

/// Lookup of limit profiles by id.
#[async_trait::async_trait]
pub trait LimitProfileRepository: Send + Sync + 'static {
    async fn get_profile(&self, id: &ProfileId) -> Result<Option<LimitProfile>, RepoError>;
}

/// Rolling-window transaction totals for an account, as of "now".
#[async_trait::async_trait]
pub trait UsageAggregator: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Trailing windows (1, 7 and 30 days)
    // ─────────────────────────────────────────────────────────────────────────────

    async fn get_daily_total(&self, account_id: AccountId) -> Result<Amount, RepoError>;

    async fn get_weekly_total(&self, account_id: AccountId) -> Result<Amount, RepoError>;

    async fn get_monthly_total(&self, account_id: AccountId) -> Result<Amount, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Lifetime
    // ─────────────────────────────────────────────────────────────────────────────

    async fn get_all_time_total(&self, account_id: AccountId) -> Result<Amount, RepoError>;
}
