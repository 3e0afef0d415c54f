//! Profile resolution: picks the configuration that governs a request.

use limits_types::{Amount, ConfigurationSet, LimitConfiguration, TransactionContext};

/// Selects the governing configuration for a request.
///
/// Among the specific rules whose criteria all match, the lowest `priority`
/// wins; equal priorities go to the rule listed first in the set. When no
/// specific rule matches, the set's default applies. The default's own
/// `priority` is ignored: it never competes with a matching specific rule.
pub fn resolve_configuration<'a>(
    set: &'a ConfigurationSet,
    context: &TransactionContext,
    all_time_total: Amount,
) -> &'a LimitConfiguration {
    set.specific()
        .iter()
        .filter(|config| config.criteria.matches(context, all_time_total))
        .min_by_key(|config| config.priority)
        .unwrap_or_else(|| set.default_configuration())
}

#[cfg(test)]
mod tests {
    use super::*;
    use limits_types::{
        ConfigurationId, MatchCriteria, PaymentMethodType, ProfileId, TransactionType,
    };

    fn rule(id: &str, priority: i32, criteria: MatchCriteria) -> LimitConfiguration {
        LimitConfiguration::new(
            ConfigurationId::new(id),
            priority,
            ProfileId::new(id),
            criteria,
        )
    }

    fn set_of(rules: Vec<LimitConfiguration>) -> ConfigurationSet {
        let mut all = rules;
        all.push(LimitConfiguration::default_for(
            ConfigurationId::new("default"),
            1000,
            ProfileId::new("default"),
        ));
        ConfigurationSet::from_configurations(all).unwrap()
    }

    fn card() -> MatchCriteria {
        MatchCriteria {
            payment_method_type: Some(PaymentMethodType::Card),
            ..Default::default()
        }
    }

    fn card_context() -> TransactionContext {
        TransactionContext::new(
            Some(TransactionType::CardPayment),
            Some(PaymentMethodType::Card),
        )
    }

    #[test]
    fn test_lowest_priority_value_wins() {
        let set = set_of(vec![rule("five", 5, card()), rule("two", 2, card())]);

        let selected = resolve_configuration(&set, &card_context(), Amount::ZERO);

        assert_eq!(selected.id.as_str(), "two");
    }

    #[test]
    fn test_falls_back_to_default() {
        let ach_only = MatchCriteria {
            payment_method_type: Some(PaymentMethodType::Ach),
            ..Default::default()
        };
        let set = set_of(vec![rule("ach", 1, ach_only)]);

        let selected = resolve_configuration(&set, &card_context(), Amount::ZERO);

        assert!(selected.is_default);
        assert_eq!(selected.id.as_str(), "default");
    }

    #[test]
    fn test_priority_tie_goes_to_first_listed() {
        let set = set_of(vec![rule("first", 3, card()), rule("second", 3, card())]);

        let selected = resolve_configuration(&set, &card_context(), Amount::ZERO);

        assert_eq!(selected.id.as_str(), "first");
    }

    #[test]
    fn test_min_total_gates_higher_tier() {
        let vip = MatchCriteria {
            min_total_transaction_amount: Some(Amount::from_units(10_000)),
            ..Default::default()
        };
        let set = set_of(vec![rule("vip", 1, vip), rule("standard", 5, MatchCriteria::default())]);

        let low = resolve_configuration(&set, &card_context(), Amount::from_units(9_999));
        let high = resolve_configuration(&set, &card_context(), Amount::from_units(10_000));

        assert_eq!(low.id.as_str(), "standard");
        assert_eq!(high.id.as_str(), "vip");
    }

    #[test]
    fn test_untyped_request_skips_typed_rules() {
        let deposit_only = MatchCriteria {
            transaction_type: Some(TransactionType::Deposit),
            ..Default::default()
        };
        let set = set_of(vec![rule("deposits", 1, deposit_only)]);

        let selected = resolve_configuration(&set, &TransactionContext::default(), Amount::ZERO);

        assert!(selected.is_default);
    }

    #[test]
    fn test_default_priority_does_not_compete() {
        let mut rules = vec![rule("specific", 50, MatchCriteria::default())];
        rules.push(LimitConfiguration::default_for(
            ConfigurationId::new("default"),
            0,
            ProfileId::new("default"),
        ));
        let set = ConfigurationSet::from_configurations(rules).unwrap();

        let selected = resolve_configuration(&set, &TransactionContext::default(), Amount::ZERO);

        assert_eq!(selected.id.as_str(), "specific");
    }
}
