use async_trait::async_trait;

use crate::moderation::application::domain::AdminSettings;
use crate::moderation::application::ports::incoming::use_cases::{
    GetSettingsError, GetSettingsUseCase,
};
use crate::moderation::application::ports::outgoing::{
    AdminSettingsRepository, AdminSettingsRepositoryError,
};

pub struct GetSettingsService<R>
where
    R: AdminSettingsRepository,
{
    repository: R,
}

impl<R> GetSettingsService<R>
where
    R: AdminSettingsRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> GetSettingsUseCase for GetSettingsService<R>
where
    R: AdminSettingsRepository + Send + Sync,
{
    async fn execute(&self) -> Result<AdminSettings, GetSettingsError> {
        self.repository.get_or_create().await.map_err(|e| match e {
            AdminSettingsRepositoryError::DatabaseError(msg) => {
                GetSettingsError::RepositoryError(msg)
            }
        })
    }
}
