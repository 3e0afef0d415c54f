//! Limit evaluation: pure checks of a proposed amount against a profile.

use limits_types::{
    Amount, CheckTransactionResult, CheckTransactionStatus, LimitProfile, LimitWindow,
    LimitsSummary, UsageSnapshot, WindowLimit,
};

/// Order in which aggregate windows are checked. When several windows are
/// exceeded at once, the first one here determines the status.
const WINDOW_ORDER: [LimitWindow; 3] = [
    LimitWindow::Monthly,
    LimitWindow::Weekly,
    LimitWindow::Daily,
];

/// Decides whether `proposed` may be spent under `profile` given `usage`.
///
/// Checks short-circuit: per-transaction bounds first, then the monthly,
/// weekly and daily caps. A window that trips reports the headroom left in
/// it (never negative) as the upper end of the range.
pub fn can_make_transaction(
    profile: &LimitProfile,
    proposed: Amount,
    usage: &UsageSnapshot,
) -> CheckTransactionResult {
    let verdict = |status, range_max| CheckTransactionResult {
        status,
        range_min: profile.min_transaction,
        range_max,
    };

    if proposed < profile.min_transaction {
        return verdict(
            CheckTransactionStatus::TransactionTooSmall,
            profile.max_transaction,
        );
    }

    if proposed > profile.max_transaction {
        return verdict(
            CheckTransactionStatus::TransactionTooLarge,
            profile.max_transaction,
        );
    }

    for window in WINDOW_ORDER {
        let Some(cap) = profile.cap_for(window) else {
            continue;
        };
        let used = usage.total_for(window);
        if used.would_exceed(proposed, cap) {
            return verdict(
                CheckTransactionStatus::limit_reached(window),
                used.remaining_under(cap),
            );
        }
    }

    verdict(CheckTransactionStatus::Allowed, profile.max_transaction)
}

/// Reports the profile's bounds alongside current usage per window.
///
/// Monthly usage is always reported, capped or not; weekly and daily only
/// appear when the profile caps them.
pub fn consumer_limits(profile: &LimitProfile, usage: &UsageSnapshot) -> LimitsSummary {
    let window_limit = |window: LimitWindow, max: Option<Amount>| WindowLimit {
        max,
        used: usage.total_for(window),
        period: window.period_days(),
    };

    LimitsSummary {
        min_transaction: profile.min_transaction,
        max_transaction: profile.max_transaction,
        monthly: window_limit(LimitWindow::Monthly, profile.monthly),
        weekly: profile
            .weekly
            .map(|cap| window_limit(LimitWindow::Weekly, Some(cap))),
        daily: profile
            .daily
            .map(|cap| window_limit(LimitWindow::Daily, Some(cap))),
    }
}
