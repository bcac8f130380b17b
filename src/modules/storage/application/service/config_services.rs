use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use super::storage_gateway::StorageGateway;
use crate::storage::application::domain::{
    keeps_stored_secret, ConnectionSettings, StorageConfig, StorageConfigDraft,
};
use crate::storage::application::ports::incoming::use_cases::{
    ActivateStorageConfigUseCase, CreateStorageConfigUseCase, DeleteStorageConfigUseCase,
    GetStorageConfigUseCase, ListStorageConfigsUseCase, StorageError, TestConnectionUseCase,
    TestStoredConfigUseCase, UpdateStorageConfigUseCase,
};
use crate::storage::application::ports::outgoing::{
    FileObjectRepository, StorageConfigRepository,
};

async fn check_connection(
    gateway: &StorageGateway,
    settings: &ConnectionSettings,
) -> Result<(), StorageError> {
    gateway.test_connection(settings).await.map_err(|e| {
        warn!(endpoint = %settings.endpoint, bucket = %settings.bucket_name, error = %e, "Storage connection test failed");
        StorageError::ConnectionFailed(e.to_string())
    })
}

async fn load<R: StorageConfigRepository + ?Sized>(
    repository: &R,
    id: i32,
) -> Result<StorageConfig, StorageError> {
    repository
        .find_by_id(id)
        .await?
        .ok_or(StorageError::ConfigNotFound)
}

// ──── Create ────

pub struct CreateStorageConfigService<R>
where
    R: StorageConfigRepository,
{
    repository: R,
    gateway: Arc<StorageGateway>,
}

impl<R> CreateStorageConfigService<R>
where
    R: StorageConfigRepository,
{
    pub fn new(repository: R, gateway: Arc<StorageGateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }
}

#[async_trait]
impl<R> CreateStorageConfigUseCase for CreateStorageConfigService<R>
where
    R: StorageConfigRepository + Send + Sync,
{
    async fn execute(&self, draft: StorageConfigDraft) -> Result<StorageConfig, StorageError> {
        draft.validate().map_err(StorageError::Validation)?;
        check_connection(&self.gateway, &draft.connection()).await?;

        let created = self.repository.create(draft, self.gateway.as_ref()).await?;
        info!(config_id = created.id, name = %created.name, active = created.is_active, "Storage config created");
        Ok(created.masked())
    }
}

// ──── Read ────

pub struct ListStorageConfigsService<R>
where
    R: StorageConfigRepository,
{
    repository: R,
}

impl<R> ListStorageConfigsService<R>
where
    R: StorageConfigRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ListStorageConfigsUseCase for ListStorageConfigsService<R>
where
    R: StorageConfigRepository + Send + Sync,
{
    async fn execute(&self) -> Result<Vec<StorageConfig>, StorageError> {
        let configs = self.repository.list().await?;
        Ok(configs.into_iter().map(StorageConfig::masked).collect())
    }
}

pub struct GetStorageConfigService<R>
where
    R: StorageConfigRepository,
{
    repository: R,
}

impl<R> GetStorageConfigService<R>
where
    R: StorageConfigRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> GetStorageConfigUseCase for GetStorageConfigService<R>
where
    R: StorageConfigRepository + Send + Sync,
{
    async fn execute(&self, id: i32) -> Result<StorageConfig, StorageError> {
        Ok(load(&self.repository, id).await?.masked())
    }
}

// ──── Update ────

pub struct UpdateStorageConfigService<R>
where
    R: StorageConfigRepository,
{
    repository: R,
    gateway: Arc<StorageGateway>,
}

impl<R> UpdateStorageConfigService<R>
where
    R: StorageConfigRepository,
{
    pub fn new(repository: R, gateway: Arc<StorageGateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }
}

#[async_trait]
impl<R> UpdateStorageConfigUseCase for UpdateStorageConfigService<R>
where
    R: StorageConfigRepository + Send + Sync,
{
    async fn execute(
        &self,
        id: i32,
        mut draft: StorageConfigDraft,
    ) -> Result<StorageConfig, StorageError> {
        let existing = load(&self.repository, id).await?;
        if keeps_stored_secret(&draft.secret_key) {
            draft.secret_key = existing.secret_key;
        }

        draft.validate().map_err(StorageError::Validation)?;
        check_connection(&self.gateway, &draft.connection()).await?;

        let updated = self
            .repository
            .update(id, draft, self.gateway.as_ref())
            .await?;
        if !updated.is_active {
            self.gateway.forget(id).await;
        }

        info!(config_id = id, active = updated.is_active, "Storage config updated");
        Ok(updated.masked())
    }
}

// ──── Delete ────

pub struct DeleteStorageConfigService<R, F>
where
    R: StorageConfigRepository,
    F: FileObjectRepository,
{
    repository: R,
    files: F,
}

impl<R, F> DeleteStorageConfigService<R, F>
where
    R: StorageConfigRepository,
    F: FileObjectRepository,
{
    pub fn new(repository: R, files: F) -> Self {
        Self { repository, files }
    }
}

#[async_trait]
impl<R, F> DeleteStorageConfigUseCase for DeleteStorageConfigService<R, F>
where
    R: StorageConfigRepository + Send + Sync,
    F: FileObjectRepository + Send + Sync,
{
    async fn execute(&self, id: i32) -> Result<(), StorageError> {
        let config = load(&self.repository, id).await?;
        if config.is_active {
            return Err(StorageError::InvalidOperation(
                "Cannot delete the active storage config".to_string(),
            ));
        }

        let files = self.files.count_by_config(id).await?;
        if files > 0 {
            return Err(StorageError::InvalidOperation(format!(
                "Cannot delete config with {} associated files",
                files
            )));
        }

        self.repository.delete(id).await?;
        info!(config_id = id, "Storage config deleted");
        Ok(())
    }
}

// ──── Activate ────

pub struct ActivateStorageConfigService<R>
where
    R: StorageConfigRepository,
{
    repository: R,
    gateway: Arc<StorageGateway>,
}

impl<R> ActivateStorageConfigService<R>
where
    R: StorageConfigRepository,
{
    pub fn new(repository: R, gateway: Arc<StorageGateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }
}

#[async_trait]
impl<R> ActivateStorageConfigUseCase for ActivateStorageConfigService<R>
where
    R: StorageConfigRepository + Send + Sync,
{
    async fn execute(&self, id: i32) -> Result<StorageConfig, StorageError> {
        let activated = self.repository.activate(id, self.gateway.as_ref()).await?;
        info!(config_id = id, name = %activated.name, "Storage config activated");
        Ok(activated.masked())
    }
}

// ──── Connection tests ────

pub struct TestConnectionService {
    gateway: Arc<StorageGateway>,
}

impl TestConnectionService {
    pub fn new(gateway: Arc<StorageGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl TestConnectionUseCase for TestConnectionService {
    async fn execute(&self, settings: ConnectionSettings) -> Result<(), StorageError> {
        check_connection(&self.gateway, &settings).await
    }
}

pub struct TestStoredConfigService<R>
where
    R: StorageConfigRepository,
{
    repository: R,
    gateway: Arc<StorageGateway>,
}

impl<R> TestStoredConfigService<R>
where
    R: StorageConfigRepository,
{
    pub fn new(repository: R, gateway: Arc<StorageGateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }
}

#[async_trait]
impl<R> TestStoredConfigUseCase for TestStoredConfigService<R>
where
    R: StorageConfigRepository + Send + Sync,
{
    async fn execute(&self, id: i32) -> Result<(), StorageError> {
        let config = load(&self.repository, id).await?;
        check_connection(&self.gateway, &config.connection()).await
    }
}
