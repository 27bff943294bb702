//! Error types for the expense payment service.

use crate::domain::CurrencyCode;

/// Domain-level errors (business logic violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// The currency code on a write did not resolve against the reference
    /// table. Made explicit here; the lookup is never allowed to dereference
    /// a missing row.
    #[error("Currency not found: {0}")]
    CurrencyNotFound(CurrencyCode),

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A referenced entity on a write did not resolve (unknown currency code).
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(DomainError::CurrencyNotFound(code)) => {
                AppError::Unprocessable(format!("Currency not found: {code}"))
            }
            RepoError::Domain(e) => AppError::BadRequest(e.to_string()),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Conflict(e) => AppError::BadRequest(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_currency_maps_to_unprocessable() {
        let code = CurrencyCode::new("XXX").unwrap();
        let err: AppError = RepoError::Domain(DomainError::CurrencyNotFound(code)).into();
        assert!(matches!(err, AppError::Unprocessable(_)));
    }

    #[test]
    fn test_repo_not_found_maps_to_not_found() {
        let err: AppError = RepoError::NotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
