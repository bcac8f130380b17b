use async_trait::async_trait;

use crate::moderation::application::domain::{AdminSettings, SettingsPatch};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AdminSettingsRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait AdminSettingsRepository: Send + Sync {
    /// Returns the singleton row, inserting `{false, false}` the first time.
    async fn get_or_create(&self) -> Result<AdminSettings, AdminSettingsRepositoryError>;

    async fn update(
        &self,
        patch: SettingsPatch,
    ) -> Result<AdminSettings, AdminSettingsRepositoryError>;
}
