//! Exact decimal amount used for every limit and usage figure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Non-negative monetary amount.
///
/// Backed by a `Decimal` so that sums over aggregation windows never
/// accumulate rounding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates a new Amount.
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::NegativeAmount);
        }
        Ok(Self(value))
    }

    /// Creates an Amount from a whole number of currency units.
    pub fn from_units(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Returns the underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition - returns error on overflow.
    pub fn checked_add(&self, other: Amount) -> Result<Amount, DomainError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(DomainError::AmountOverflow)
    }

    /// Headroom left under `cap` once `self` has been used, clamped at zero.
    pub fn remaining_under(&self, cap: Amount) -> Amount {
        if self.0 >= cap.0 {
            Amount::ZERO
        } else {
            Amount(cap.0 - self.0)
        }
    }

    /// Returns true if adding `proposed` to `self` would go over `cap`.
    pub fn would_exceed(&self, proposed: Amount, cap: Amount) -> bool {
        match self.0.checked_add(proposed.0) {
            Some(total) => total > cap.0,
            None => true,
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl std::str::FromStr for Amount {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str_exact(s.trim())
            .map_err(|e| DomainError::ValidationError(format!("Invalid amount '{}': {}", s, e)))?;
        Amount::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
