//! Rolling-window usage totals.

use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// Trailing aggregation window a cap applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitWindow {
    Daily,
    Weekly,
    Monthly,
}

impl LimitWindow {
    /// Window length in days.
    pub fn period_days(&self) -> u32 {
        match self {
            LimitWindow::Daily => 1,
            LimitWindow::Weekly => 7,
            LimitWindow::Monthly => 30,
        }
    }
}

impl std::fmt::Display for LimitWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitWindow::Daily => write!(f, "daily"),
            LimitWindow::Weekly => write!(f, "weekly"),
            LimitWindow::Monthly => write!(f, "monthly"),
        }
    }
}

/// An account's historical totals as of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub daily_total: Amount,
    pub weekly_total: Amount,
    pub monthly_total: Amount,
    pub all_time_total: Amount,
}

impl UsageSnapshot {
    /// Total used within the given window.
    pub fn total_for(&self, window: LimitWindow) -> Amount {
        match window {
            LimitWindow::Daily => self.daily_total,
            LimitWindow::Weekly => self.weekly_total,
            LimitWindow::Monthly => self.monthly_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_days() {
        assert_eq!(LimitWindow::Daily.period_days(), 1);
        assert_eq!(LimitWindow::Weekly.period_days(), 7);
        assert_eq!(LimitWindow::Monthly.period_days(), 30);
    }

    #[test]
    fn test_total_for_window() {
        let usage = UsageSnapshot {
            daily_total: Amount::from_units(1),
            weekly_total: Amount::from_units(7),
            monthly_total: Amount::from_units(30),
            all_time_total: Amount::from_units(365),
        };
        assert_eq!(usage.total_for(LimitWindow::Weekly), Amount::from_units(7));
        assert_eq!(usage.total_for(LimitWindow::Monthly), Amount::from_units(30));
    }
}
