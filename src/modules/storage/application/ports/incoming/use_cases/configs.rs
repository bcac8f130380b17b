use async_trait::async_trait;

use super::StorageError;
use crate::storage::application::domain::{ConnectionSettings, StorageConfig, StorageConfigDraft};

// Every returned config has its secret masked.

/// Tests the connection first; an active draft becomes the only active config.
#[async_trait]
pub trait CreateStorageConfigUseCase: Send + Sync {
    async fn execute(&self, draft: StorageConfigDraft) -> Result<StorageConfig, StorageError>;
}

#[async_trait]
pub trait ListStorageConfigsUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<StorageConfig>, StorageError>;
}

#[async_trait]
pub trait GetStorageConfigUseCase: Send + Sync {
    async fn execute(&self, id: i32) -> Result<StorageConfig, StorageError>;
}

/// An empty or masked secret keeps the stored secret.
#[async_trait]
pub trait UpdateStorageConfigUseCase: Send + Sync {
    async fn execute(
        &self,
        id: i32,
        draft: StorageConfigDraft,
    ) -> Result<StorageConfig, StorageError>;
}

/// Refused for the active config and for configs still referenced by files.
#[async_trait]
pub trait DeleteStorageConfigUseCase: Send + Sync {
    async fn execute(&self, id: i32) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ActivateStorageConfigUseCase: Send + Sync {
    async fn execute(&self, id: i32) -> Result<StorageConfig, StorageError>;
}

/// Ad-hoc connection test; nothing is stored.
#[async_trait]
pub trait TestConnectionUseCase: Send + Sync {
    async fn execute(&self, settings: ConnectionSettings) -> Result<(), StorageError>;
}

#[async_trait]
pub trait TestStoredConfigUseCase: Send + Sync {
    async fn execute(&self, id: i32) -> Result<(), StorageError>;
}
