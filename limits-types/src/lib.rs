//! # Limits Types
//!
//! Domain types and port traits for the transaction limits engine.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Amount, LimitProfile, LimitConfiguration, UsageSnapshot)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Requests accepted by the service
//! - `error/` - Domain, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AccountId, Amount, CheckTransactionResult, CheckTransactionStatus, ConfigurationId,
    ConfigurationSet, EntryStatus, LedgerEntry, LimitConfiguration, LimitProfile, LimitWindow,
    LimitsSummary, MatchCriteria, PaymentMethodType, ProfileId, TransactionContext,
    TransactionType, UsageSnapshot, WindowLimit,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{LimitConfigurationRepository, LimitProfileRepository, UsageAggregator};
