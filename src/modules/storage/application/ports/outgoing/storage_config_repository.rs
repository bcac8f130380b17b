use async_trait::async_trait;

use crate::storage::application::domain::{StorageConfig, StorageConfigDraft};

#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageConfigRepositoryError {
    #[error("Storage config not found")]
    NotFound,

    #[error("Storage config name already exists")]
    NameTaken,

    #[error("Activation failed: {0}")]
    ActivationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Runs inside the transaction that makes a config active; an error rolls it back.
#[async_trait]
pub trait ActivationHook: Send + Sync {
    async fn activated(&self, config: &StorageConfig) -> Result<(), String>;
}

#[async_trait]
pub trait StorageConfigRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<StorageConfig>, StorageConfigRepositoryError>;

    async fn find_by_id(&self, id: i32)
        -> Result<Option<StorageConfig>, StorageConfigRepositoryError>;

    async fn find_active(&self) -> Result<Option<StorageConfig>, StorageConfigRepositoryError>;

    /// When the draft is active every other config is deactivated and `hook` runs before commit.
    async fn create(
        &self,
        draft: StorageConfigDraft,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError>;

    /// Same activation semantics as `create`.
    async fn update(
        &self,
        id: i32,
        draft: StorageConfigDraft,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError>;

    async fn delete(&self, id: i32) -> Result<(), StorageConfigRepositoryError>;

    /// Deactivates all, activates `id`, runs `hook`, commits only if the hook succeeded.
    async fn activate(
        &self,
        id: i32,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError>;
}
