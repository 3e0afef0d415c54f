//! Limit profile domain model.

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::usage::LimitWindow;
use crate::error::DomainError;

/// Identifier of a limit profile, assigned by whoever administers the rule set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named bundle of transaction limits.
///
/// `daily`, `weekly` and `monthly` are aggregate caps over trailing
/// windows; `None` means there is no cap at that granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitProfile {
    pub id: ProfileId,
    pub name: String,
    pub min_transaction: Amount,
    pub max_transaction: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<Amount>,
    #[serde(default)]
    pub unsettled_exposure: Amount,
}

impl LimitProfile {
    /// Creates a profile with per-transaction bounds and no aggregate caps.
    ///
    /// # Validation
    /// - Name cannot be empty
    /// - Both bounds must be positive, with min <= max
    pub fn new(
        id: ProfileId,
        name: impl Into<String>,
        min_transaction: Amount,
        max_transaction: Amount,
    ) -> Result<Self, DomainError> {
        let profile = Self {
            id,
            name: name.into(),
            min_transaction,
            max_transaction,
            daily: None,
            weekly: None,
            monthly: None,
            unsettled_exposure: Amount::ZERO,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn with_daily(mut self, cap: Amount) -> Self {
        self.daily = Some(cap);
        self
    }

    pub fn with_weekly(mut self, cap: Amount) -> Self {
        self.weekly = Some(cap);
        self
    }

    pub fn with_monthly(mut self, cap: Amount) -> Self {
        self.monthly = Some(cap);
        self
    }

    /// Aggregate cap for a window, if one is configured.
    pub fn cap_for(&self, window: LimitWindow) -> Option<Amount> {
        match window {
            LimitWindow::Daily => self.daily,
            LimitWindow::Weekly => self.weekly,
            LimitWindow::Monthly => self.monthly,
        }
    }

    /// Checks the invariants that deserialized profiles skip.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::ValidationError(format!(
                "Limit profile {} has an empty name",
                self.id
            )));
        }
        if self.min_transaction.is_zero() || self.max_transaction.is_zero() {
            return Err(DomainError::ValidationError(format!(
                "Limit profile {} must have positive per-transaction bounds",
                self.id
            )));
        }
        if self.min_transaction > self.max_transaction {
            return Err(DomainError::ValidationError(format!(
                "Limit profile {}: min_transaction {} exceeds max_transaction {}",
                self.id, self.min_transaction, self.max_transaction
            )));
        }
        Ok(())
    }
}
