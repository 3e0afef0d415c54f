//! Limit configuration rules and the active rule set.

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::profile::ProfileId;
use super::transaction::{PaymentMethodType, TransactionType};
use crate::error::DomainError;

/// Identifier of a limit configuration rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationId(String);

impl ConfigurationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConfigurationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The transaction attributes a configuration is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_type: Option<PaymentMethodType>,
}

impl TransactionContext {
    pub fn new(
        transaction_type: Option<TransactionType>,
        payment_method_type: Option<PaymentMethodType>,
    ) -> Self {
        Self {
            transaction_type,
            payment_method_type,
        }
    }
}

/// Optional match criteria of a configuration. Unset fields are wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_type: Option<PaymentMethodType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_total_transaction_amount: Option<Amount>,
}

impl MatchCriteria {
    /// Returns true when every set criterion is satisfied.
    ///
    /// A set type criterion only matches a request carrying the same type;
    /// a request without a type matches wildcard criteria only.
    pub fn matches(&self, context: &TransactionContext, all_time_total: Amount) -> bool {
        let type_ok = self
            .transaction_type
            .is_none_or(|t| context.transaction_type == Some(t));
        let method_ok = self
            .payment_method_type
            .is_none_or(|m| context.payment_method_type == Some(m));
        let total_ok = self
            .min_total_transaction_amount
            .is_none_or(|min| all_time_total >= min);

        type_ok && method_ok && total_ok
    }
}

/// A prioritized rule mapping match criteria to a limit profile.
///
/// Lower `priority` values take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitConfiguration {
    pub id: ConfigurationId,
    #[serde(default)]
    pub is_default: bool,
    pub priority: i32,
    pub profile_id: ProfileId,
    #[serde(default)]
    pub criteria: MatchCriteria,
}

impl LimitConfiguration {
    /// Creates a non-default rule.
    pub fn new(
        id: ConfigurationId,
        priority: i32,
        profile_id: ProfileId,
        criteria: MatchCriteria,
    ) -> Self {
        Self {
            id,
            is_default: false,
            priority,
            profile_id,
            criteria,
        }
    }

    /// Creates the fallback rule. It carries no criteria.
    pub fn default_for(id: ConfigurationId, priority: i32, profile_id: ProfileId) -> Self {
        Self {
            id,
            is_default: true,
            priority,
            profile_id,
            criteria: MatchCriteria::default(),
        }
    }
}

/// The active rule set, split into specific rules and the single fallback.
///
/// Holding the default separately means resolution can never run without
/// one; the check happens once, when the set is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationSet {
    specific: Vec<LimitConfiguration>,
    default: LimitConfiguration,
}

impl ConfigurationSet {
    /// Partitions a flat list of active configurations.
    ///
    /// Specific rules keep their input order, which breaks priority ties.
    pub fn from_configurations(
        configurations: Vec<LimitConfiguration>,
    ) -> Result<Self, DomainError> {
        let (defaults, specific): (Vec<_>, Vec<_>) =
            configurations.into_iter().partition(|c| c.is_default);

        let mut defaults = defaults.into_iter();
        let default = match (defaults.next(), defaults.next()) {
            (Some(default), None) => default,
            (None, _) => {
                return Err(DomainError::Configuration(
                    "no default limit configuration in the active set".into(),
                ));
            }
            (Some(first), Some(second)) => {
                return Err(DomainError::Configuration(format!(
                    "multiple default limit configurations in the active set: {}, {}",
                    first.id, second.id
                )));
            }
        };

        Ok(Self { specific, default })
    }

    pub fn specific(&self) -> &[LimitConfiguration] {
        &self.specific
    }

    pub fn default_configuration(&self) -> &LimitConfiguration {
        &self.default
    }

    /// Number of active configurations, the default included.
    pub fn count(&self) -> usize {
        self.specific.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, priority: i32, criteria: MatchCriteria) -> LimitConfiguration {
        LimitConfiguration::new(
            ConfigurationId::new(id),
            priority,
            ProfileId::new(format!("{}-profile", id)),
            criteria,
        )
    }

    fn fallback() -> LimitConfiguration {
        LimitConfiguration::default_for(
            ConfigurationId::new("default"),
            100,
            ProfileId::new("default-profile"),
        )
    }

    #[test]
    fn test_wildcard_criteria_match_anything() {
        let criteria = MatchCriteria::default();
        let context = TransactionContext::new(
            Some(TransactionType::Withdrawal),
            Some(PaymentMethodType::Card),
        );
        assert!(criteria.matches(&context, Amount::ZERO));
        assert!(criteria.matches(&TransactionContext::default(), Amount::ZERO));
    }

    #[test]
    fn test_type_criteria_require_equal_request() {
        let criteria = MatchCriteria {
            transaction_type: Some(TransactionType::Deposit),
            ..Default::default()
        };
        let deposit = TransactionContext::new(Some(TransactionType::Deposit), None);
        let withdrawal = TransactionContext::new(Some(TransactionType::Withdrawal), None);

        assert!(criteria.matches(&deposit, Amount::ZERO));
        assert!(!criteria.matches(&withdrawal, Amount::ZERO));
        assert!(!criteria.matches(&TransactionContext::default(), Amount::ZERO));
    }

    #[test]
    fn test_min_total_threshold_is_inclusive() {
        let criteria = MatchCriteria {
            min_total_transaction_amount: Some(Amount::from_units(1000)),
            ..Default::default()
        };
        let context = TransactionContext::default();

        assert!(!criteria.matches(&context, Amount::from_units(999)));
        assert!(criteria.matches(&context, Amount::from_units(1000)));
    }

    #[test]
    fn test_set_requires_a_default() {
        let result = ConfigurationSet::from_configurations(vec![rule(
            "card",
            1,
            MatchCriteria::default(),
        )]);
        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }

    #[test]
    fn test_set_rejects_multiple_defaults() {
        let mut second = fallback();
        second.id = ConfigurationId::new("default-2");
        let result = ConfigurationSet::from_configurations(vec![fallback(), second]);
        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }

    #[test]
    fn test_set_partitions_and_keeps_order() {
        let set = ConfigurationSet::from_configurations(vec![
            rule("b", 5, MatchCriteria::default()),
            fallback(),
            rule("a", 5, MatchCriteria::default()),
        ])
        .unwrap();

        let ids: Vec<_> = set.specific().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(set.default_configuration().id.as_str(), "default");
        assert_eq!(set.count(), 3);
    }
}
