//! Transaction classification and the ledger entries usage is summed from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::AccountId;
use super::amount::Amount;
use crate::error::DomainError;

/// The kind of transaction being limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money coming into an account from external source
    Deposit,
    /// Money leaving an account to external destination
    Withdrawal,
    /// Money moving between two accounts in the system
    Transfer,
    /// Card spend routed through the card processor
    CardPayment,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "DEPOSIT"),
            TransactionType::Withdrawal => write!(f, "WITHDRAWAL"),
            TransactionType::Transfer => write!(f, "TRANSFER"),
            TransactionType::CardPayment => write!(f, "CARD_PAYMENT"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "DEPOSIT" => Ok(TransactionType::Deposit),
            "WITHDRAWAL" => Ok(TransactionType::Withdrawal),
            "TRANSFER" => Ok(TransactionType::Transfer),
            "CARD_PAYMENT" => Ok(TransactionType::CardPayment),
            _ => Err(DomainError::ValidationError(format!(
                "Unknown transaction type: {}",
                s
            ))),
        }
    }
}

/// The funding instrument behind a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodType {
    Card,
    Ach,
    Wallet,
}

impl std::fmt::Display for PaymentMethodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethodType::Card => write!(f, "CARD"),
            PaymentMethodType::Ach => write!(f, "ACH"),
            PaymentMethodType::Wallet => write!(f, "WALLET"),
        }
    }
}

impl std::str::FromStr for PaymentMethodType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CARD" => Ok(PaymentMethodType::Card),
            "ACH" => Ok(PaymentMethodType::Ach),
            "WALLET" => Ok(PaymentMethodType::Wallet),
            _ => Err(DomainError::ValidationError(format!(
                "Unknown payment method type: {}",
                s
            ))),
        }
    }
}

/// Settlement state of a recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    #[default]
    Success,
    Pending,
    Failed,
}

impl EntryStatus {
    /// Failed transactions never moved money and do not consume limits.
    pub fn counts_toward_limits(&self) -> bool {
        !matches!(self, EntryStatus::Failed)
    }
}

/// A historical transaction as seen by the usage aggregator.
///
/// Entries are immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub account_id: AccountId,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_type: Option<PaymentMethodType>,
    #[serde(default)]
    pub status: EntryStatus,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Creates a successful entry recorded at `created_at`.
    pub fn new(account_id: AccountId, amount: Amount, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            amount,
            transaction_type: None,
            payment_method_type: None,
            status: EntryStatus::Success,
            created_at,
        }
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!(
            "card-payment".parse::<TransactionType>().unwrap(),
            TransactionType::CardPayment
        );
        assert_eq!(
            "Withdrawal".parse::<TransactionType>().unwrap(),
            TransactionType::Withdrawal
        );
        assert!("refund".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_payment_method_serde_format() {
        let json = serde_json::to_string(&PaymentMethodType::Ach).unwrap();
        assert_eq!(json, "\"ACH\"");
        let parsed: TransactionType = serde_json::from_str("\"CARD_PAYMENT\"").unwrap();
        assert_eq!(parsed, TransactionType::CardPayment);
    }

    #[test]
    fn test_failed_entries_do_not_count() {
        assert!(EntryStatus::Success.counts_toward_limits());
        assert!(EntryStatus::Pending.counts_toward_limits());
        assert!(!EntryStatus::Failed.counts_toward_limits());
    }

    #[test]
    fn test_entry_deserializes_with_defaults() {
        let json = r#"{
            "account_id": "6f1c1d3e-8a2b-4c1e-9d3f-2a4b5c6d7e8f",
            "amount": "25.00",
            "created_at": "2026-01-15T10:00:00Z"
        }"#;
        let entry: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.status, EntryStatus::Success);
        assert!(entry.transaction_type.is_none());
        assert_eq!(entry.amount.to_string(), "25");
    }
}
