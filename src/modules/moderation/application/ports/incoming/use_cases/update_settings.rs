use async_trait::async_trait;
use std::fmt;

use crate::moderation::application::domain::{AdminSettings, SettingsPatch};

#[derive(Debug, Clone)]
pub enum UpdateSettingsError {
    RepositoryError(String),
}

impl fmt::Display for UpdateSettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateSettingsError::RepositoryError(msg) => write!(f, "repository error: {}", msg),
        }
    }
}

#[async_trait]
pub trait UpdateSettingsUseCase: Send + Sync {
    async fn execute(&self, patch: SettingsPatch) -> Result<AdminSettings, UpdateSettingsError>;
}
