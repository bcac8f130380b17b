use async_trait::async_trait;
use std::fmt;

use crate::moderation::application::domain::AdminSettings;

#[derive(Debug, Clone)]
pub enum GetSettingsError {
    RepositoryError(String),
}

impl fmt::Display for GetSettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GetSettingsError::RepositoryError(msg) => write!(f, "repository error: {}", msg),
        }
    }
}

#[async_trait]
pub trait GetSettingsUseCase: Send + Sync {
    async fn execute(&self) -> Result<AdminSettings, GetSettingsError>;
}
