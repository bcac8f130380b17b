use std::fmt;

use crate::storage::application::ports::outgoing::{
    FileObjectRepositoryError, StorageConfigRepositoryError,
};
use crate::storage::application::service::GatewayError;

/// Failure shared by the storage config and file use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    ConfigNotFound,
    FileNotFound,
    NameTaken,
    Forbidden,
    Validation(String),
    /// The object store could not be reached with the given settings.
    ConnectionFailed(String),
    InvalidOperation(String),
    /// No active storage config has been initialised.
    NotInitialized,
    Internal(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConfigNotFound => write!(f, "Storage config not found"),
            StorageError::FileNotFound => write!(f, "File not found"),
            StorageError::NameTaken => write!(f, "Storage config name already exists"),
            StorageError::Forbidden => write!(f, "Permission denied"),
            StorageError::Validation(msg) => write!(f, "{}", msg),
            StorageError::ConnectionFailed(msg) => write!(f, "Connection test failed: {}", msg),
            StorageError::InvalidOperation(msg) => write!(f, "{}", msg),
            StorageError::NotInitialized => write!(f, "Object storage is not initialized"),
            StorageError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageConfigRepositoryError> for StorageError {
    fn from(e: StorageConfigRepositoryError) -> Self {
        match e {
            StorageConfigRepositoryError::NotFound => StorageError::ConfigNotFound,
            StorageConfigRepositoryError::NameTaken => StorageError::NameTaken,
            StorageConfigRepositoryError::ActivationFailed(msg) => {
                StorageError::ConnectionFailed(msg)
            }
            StorageConfigRepositoryError::DatabaseError(msg) => StorageError::Internal(msg),
        }
    }
}

impl From<FileObjectRepositoryError> for StorageError {
    fn from(e: FileObjectRepositoryError) -> Self {
        match e {
            FileObjectRepositoryError::NotFound => StorageError::FileNotFound,
            FileObjectRepositoryError::DatabaseError(msg)
            | FileObjectRepositoryError::CorruptRow(msg) => StorageError::Internal(msg),
        }
    }
}

impl From<GatewayError> for StorageError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::NotInitialized => StorageError::NotInitialized,
            other => StorageError::Internal(other.to_string()),
        }
    }
}
