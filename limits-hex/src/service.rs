//! Limits Application Service
//!
//! Fetches rule sets and usage through the ports, then hands the
//! materialized values to the pure resolver and evaluator.
//! Contains NO infrastructure logic - pure business orchestration.

use limits_types::{
    AccountId, Amount, AppError, CheckTransactionRequest, CheckTransactionResult, DomainError,
    LimitConfiguration, LimitConfigurationRepository, LimitProfile, LimitProfileRepository,
    LimitsQuery, LimitsSummary, RepoError, TransactionContext, UsageAggregator, UsageSnapshot,
};

use crate::{evaluator, resolver};

/// Application service for limit resolution and enforcement.
///
/// Generic over its three ports - adapters are injected at compile time.
/// The service keeps no state between calls, so concurrent checks for the
/// same account are independent: making "check then commit" atomic is up
/// to the caller.
pub struct LimitsService<C, P, U>
where
    C: LimitConfigurationRepository,
    P: LimitProfileRepository,
    U: UsageAggregator,
{
    configurations: C,
    profiles: P,
    usage: U,
}

impl<C, P, U> LimitsService<C, P, U>
where
    C: LimitConfigurationRepository,
    P: LimitProfileRepository,
    U: UsageAggregator,
{
    /// Creates a new limits service over the given collaborators.
    pub fn new(configurations: C, profiles: P, usage: U) -> Self {
        Self {
            configurations,
            profiles,
            usage,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Enforcement
    // ─────────────────────────────────────────────────────────────────────────────

    /// Checks a proposed transaction against the account's resolved profile.
    ///
    /// Deny outcomes are returned as `Ok` with an informative status; only
    /// rule-set integrity and collaborator failures are errors.
    #[tracing::instrument(
        skip(self, req),
        fields(
            account_id = %req.account_id,
            amount = %req.amount,
            transaction_type = ?req.transaction_type,
            payment_method_type = ?req.payment_method_type
        )
    )]
    pub async fn can_make_transaction(
        &self,
        req: CheckTransactionRequest,
    ) -> Result<CheckTransactionResult, AppError> {
        let usage = self.usage_snapshot(req.account_id).await?;
        let profile = self
            .resolve_profile(&req.context(), usage.all_time_total)
            .await?;

        let result = evaluator::can_make_transaction(&profile, req.amount, &usage);

        if result.status.is_allowed() {
            tracing::debug!(profile_id = %profile.id, "Transaction within limits");
        } else {
            tracing::info!(
                profile_id = %profile.id,
                status = %result.status,
                range_min = %result.range_min,
                range_max = %result.range_max,
                "Transaction denied by limits"
            );
        }

        Ok(result)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Reporting
    // ─────────────────────────────────────────────────────────────────────────────

    /// Reports the resolved profile's bounds and the account's current usage.
    #[tracing::instrument(skip(self, query), fields(account_id = %query.account_id))]
    pub async fn get_consumer_limits(&self, query: LimitsQuery) -> Result<LimitsSummary, AppError> {
        let usage = self.usage_snapshot(query.account_id).await?;
        let profile = self
            .resolve_profile(&query.context(), usage.all_time_total)
            .await?;

        Ok(evaluator::consumer_limits(&profile, &usage))
    }

    /// Resolves the profile governing the account, without evaluating usage.
    #[tracing::instrument(skip(self, query), fields(account_id = %query.account_id))]
    pub async fn get_limits(&self, query: LimitsQuery) -> Result<LimitProfile, AppError> {
        let all_time_total = self.usage.get_all_time_total(query.account_id).await?;

        self.resolve_profile(&query.context(), all_time_total)
            .await
            .map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Collaborator reads
    // ─────────────────────────────────────────────────────────────────────────────

    /// Fetches all four totals concurrently and materializes them.
    async fn usage_snapshot(&self, account_id: AccountId) -> Result<UsageSnapshot, RepoError> {
        let (daily_total, weekly_total, monthly_total, all_time_total) = tokio::try_join!(
            self.usage.get_daily_total(account_id),
            self.usage.get_weekly_total(account_id),
            self.usage.get_monthly_total(account_id),
            self.usage.get_all_time_total(account_id),
        )?;

        Ok(UsageSnapshot {
            daily_total,
            weekly_total,
            monthly_total,
            all_time_total,
        })
    }

    async fn resolve_profile(
        &self,
        context: &TransactionContext,
        all_time_total: Amount,
    ) -> Result<LimitProfile, RepoError> {
        let set = self
            .configurations
            .get_all_active_configurations()
            .await
            .inspect_err(|e| {
                if matches!(e, RepoError::Domain(DomainError::Configuration(_))) {
                    tracing::error!("Active limit configurations are unusable: {}", e);
                }
            })?;

        let config = resolver::resolve_configuration(&set, context, all_time_total);
        tracing::debug!(
            configuration_id = %config.id,
            profile_id = %config.profile_id,
            is_default = config.is_default,
            "Resolved limit configuration"
        );

        self.load_profile(config).await
    }

    async fn load_profile(&self, config: &LimitConfiguration) -> Result<LimitProfile, RepoError> {
        match self.profiles.get_profile(&config.profile_id).await? {
            Some(profile) => Ok(profile),
            None => {
                tracing::error!(
                    configuration_id = %config.id,
                    profile_id = %config.profile_id,
                    "Limit configuration references a missing profile"
                );
                Err(DomainError::ProfileNotFound(config.profile_id.clone()).into())
            }
        }
    }
}
