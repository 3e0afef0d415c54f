//! Request types accepted by the limits service.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount, PaymentMethodType, TransactionContext, TransactionType};

/// Request to check whether a proposed transaction is within limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckTransactionRequest {
    pub account_id: AccountId,
    /// Proposed transaction amount
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_type: Option<PaymentMethodType>,
}

impl CheckTransactionRequest {
    pub fn context(&self) -> TransactionContext {
        TransactionContext::new(self.transaction_type, self.payment_method_type)
    }
}

/// Request for the limits that apply to an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsQuery {
    pub account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_type: Option<PaymentMethodType>,
}

impl LimitsQuery {
    /// Query that matches wildcard rules only.
    pub fn for_account(account_id: AccountId) -> Self {
        Self {
            account_id,
            transaction_type: None,
            payment_method_type: None,
        }
    }

    pub fn context(&self) -> TransactionContext {
        TransactionContext::new(self.transaction_type, self.payment_method_type)
    }
}
