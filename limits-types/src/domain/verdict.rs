//! Evaluation outputs: the allow/deny verdict and the limits summary.

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::usage::LimitWindow;

/// Outcome of checking a proposed transaction against its profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckTransactionStatus {
    Allowed,
    TransactionTooSmall,
    TransactionTooLarge,
    MonthlyLimitReached,
    WeeklyLimitReached,
    DailyLimitReached,
}

impl CheckTransactionStatus {
    pub fn is_allowed(&self) -> bool {
        matches!(self, CheckTransactionStatus::Allowed)
    }

    /// The `*_LIMIT_REACHED` status for a window.
    pub fn limit_reached(window: LimitWindow) -> Self {
        match window {
            LimitWindow::Daily => CheckTransactionStatus::DailyLimitReached,
            LimitWindow::Weekly => CheckTransactionStatus::WeeklyLimitReached,
            LimitWindow::Monthly => CheckTransactionStatus::MonthlyLimitReached,
        }
    }
}

impl std::fmt::Display for CheckTransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CheckTransactionStatus::Allowed => "ALLOWED",
            CheckTransactionStatus::TransactionTooSmall => "TRANSACTION_TOO_SMALL",
            CheckTransactionStatus::TransactionTooLarge => "TRANSACTION_TOO_LARGE",
            CheckTransactionStatus::MonthlyLimitReached => "MONTHLY_LIMIT_REACHED",
            CheckTransactionStatus::WeeklyLimitReached => "WEEKLY_LIMIT_REACHED",
            CheckTransactionStatus::DailyLimitReached => "DAILY_LIMIT_REACHED",
        };
        f.write_str(s)
    }
}

/// Verdict plus the amount range currently permitted.
///
/// `range_max` may be below `range_min` (down to zero) when a window is
/// exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckTransactionResult {
    pub status: CheckTransactionStatus,
    pub range_min: Amount,
    pub range_max: Amount,
}

/// Cap, usage and length of one aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowLimit {
    /// `None` when the profile sets no cap for this window
    pub max: Option<Amount>,
    pub used: Amount,
    /// Window length in days
    pub period: u32,
}

/// Read-only view of an account's limits and current usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsSummary {
    pub min_transaction: Amount,
    pub max_transaction: Amount,
    pub monthly: WindowLimit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly: Option<WindowLimit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<WindowLimit>,
}
