use std::fmt;

use crate::portfolio::application::ports::outgoing::{
    AuthorDirectoryError, PortfolioQueryError, PortfolioRepositoryError,
};

/// Failure shared by the portfolio and version use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioError {
    /// Absent, or not visible to the caller.
    NotFound,
    VersionNotFound,
    Forbidden,
    Validation(String),
    /// Valid request against a state that does not allow it.
    InvalidOperation(String),
    Internal(String),
}

impl fmt::Display for PortfolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortfolioError::NotFound => write!(f, "Portfolio not found"),
            PortfolioError::VersionNotFound => write!(f, "Version not found"),
            PortfolioError::Forbidden => write!(f, "Permission denied"),
            PortfolioError::Validation(msg) => write!(f, "{}", msg),
            PortfolioError::InvalidOperation(msg) => write!(f, "{}", msg),
            PortfolioError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for PortfolioError {}

impl From<PortfolioQueryError> for PortfolioError {
    fn from(e: PortfolioQueryError) -> Self {
        PortfolioError::Internal(e.to_string())
    }
}

impl From<AuthorDirectoryError> for PortfolioError {
    fn from(e: AuthorDirectoryError) -> Self {
        PortfolioError::Internal(e.to_string())
    }
}

impl From<PortfolioRepositoryError> for PortfolioError {
    fn from(e: PortfolioRepositoryError) -> Self {
        match e {
            PortfolioRepositoryError::NotFound => PortfolioError::NotFound,
            PortfolioRepositoryError::VersionNotFound => PortfolioError::VersionNotFound,
            PortfolioRepositoryError::VersionActive => {
                PortfolioError::InvalidOperation("Cannot delete the active version".to_string())
            }
            PortfolioRepositoryError::DatabaseError(msg)
            | PortfolioRepositoryError::SerializationError(msg) => PortfolioError::Internal(msg),
        }
    }
}
