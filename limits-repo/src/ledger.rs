//! In-memory ledger implementing the usage aggregator port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use limits_types::{
    AccountId, Amount, LedgerEntry, LimitWindow, RepoError, UsageAggregator, UsageSnapshot,
};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Ledger of recorded transactions, summed over trailing windows on demand.
///
/// Only entries at or before "now" are counted, and failed entries never
/// are. A window of N days covers `[now - N days, now]`, both ends inclusive.
#[derive(Clone)]
pub struct InMemoryLedger {
    entries: Arc<DashMap<AccountId, Vec<LedgerEntry>>>,
    clock: Clock,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedger {
    /// Creates an empty ledger reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Creates an empty ledger with an injected clock.
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock: Arc::new(clock),
        }
    }

    /// Appends an entry to its account's history.
    pub fn record(&self, entry: LedgerEntry) {
        self.entries.entry(entry.account_id).or_default().push(entry);
    }

    pub fn entry_count(&self) -> usize {
        self.entries.iter().map(|account| account.value().len()).sum()
    }

    /// All four totals for an account as of `now`.
    pub fn totals_as_of(
        &self,
        account_id: AccountId,
        now: DateTime<Utc>,
    ) -> Result<UsageSnapshot, RepoError> {
        Ok(UsageSnapshot {
            daily_total: self.window_total(account_id, now, Some(LimitWindow::Daily))?,
            weekly_total: self.window_total(account_id, now, Some(LimitWindow::Weekly))?,
            monthly_total: self.window_total(account_id, now, Some(LimitWindow::Monthly))?,
            all_time_total: self.window_total(account_id, now, None)?,
        })
    }

    /// Sum of counted entries in `window`; `None` means since the beginning.
    fn window_total(
        &self,
        account_id: AccountId,
        now: DateTime<Utc>,
        window: Option<LimitWindow>,
    ) -> Result<Amount, RepoError> {
        let Some(history) = self.entries.get(&account_id) else {
            return Ok(Amount::ZERO);
        };

        let start = window.map(|w| now - Duration::days(i64::from(w.period_days())));

        history
            .iter()
            .filter(|entry| entry.status.counts_toward_limits())
            .filter(|entry| entry.created_at <= now)
            .filter(|entry| start.is_none_or(|start| entry.created_at >= start))
            .try_fold(Amount::ZERO, |total, entry| total.checked_add(entry.amount))
            .map_err(|e| RepoError::Storage(format!("usage total for {account_id}: {e}")))
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

#[async_trait]
impl UsageAggregator for InMemoryLedger {
    async fn get_daily_total(&self, account_id: AccountId) -> Result<Amount, RepoError> {
        self.window_total(account_id, self.now(), Some(LimitWindow::Daily))
    }

    async fn get_weekly_total(&self, account_id: AccountId) -> Result<Amount, RepoError> {
        self.window_total(account_id, self.now(), Some(LimitWindow::Weekly))
    }

    async fn get_monthly_total(&self, account_id: AccountId) -> Result<Amount, RepoError> {
        self.window_total(account_id, self.now(), Some(LimitWindow::Monthly))
    }

    async fn get_all_time_total(&self, account_id: AccountId) -> Result<Amount, RepoError> {
        self.window_total(account_id, self.now(), None)
    }
}
