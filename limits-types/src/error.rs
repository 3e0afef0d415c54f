//! Error types for the limits engine.

use crate::domain::ProfileId;

/// Domain-level errors (business rule and rule-set integrity violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Amount overflow")]
    AmountOverflow,

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The administered rule set is unusable (missing or duplicate default).
    #[error("Limit configuration error: {0}")]
    Configuration(String),

    /// A configuration references a profile that does not exist.
    #[error("Limit profile not found: {0}")]
    ProfileNotFound(ProfileId),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors returned to callers of the service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            // Rule-set integrity problems are never the caller's fault.
            DomainError::Configuration(_) | DomainError::ProfileNotFound(_) => {
                AppError::Internal(err.to_string())
            }
            DomainError::ValidationError(msg) => AppError::BadRequest(msg),
            e => AppError::BadRequest(e.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::Storage(e) => AppError::Internal(e),
            RepoError::Conflict(e) => AppError::Internal(e),
        }
    }
}
