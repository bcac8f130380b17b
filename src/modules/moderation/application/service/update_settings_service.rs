use async_trait::async_trait;

use crate::moderation::application::domain::{AdminSettings, SettingsPatch};
use crate::moderation::application::ports::incoming::use_cases::{
    UpdateSettingsError, UpdateSettingsUseCase,
};
use crate::moderation::application::ports::outgoing::{
    AdminSettingsRepository, AdminSettingsRepositoryError,
};

pub struct UpdateSettingsService<R>
where
    R: AdminSettingsRepository,
{
    repository: R,
}

impl<R> UpdateSettingsService<R>
where
    R: AdminSettingsRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UpdateSettingsUseCase for UpdateSettingsService<R>
where
    R: AdminSettingsRepository + Send + Sync,
{
    async fn execute(&self, patch: SettingsPatch) -> Result<AdminSettings, UpdateSettingsError> {
        self.repository.update(patch).await.map_err(|e| match e {
            AdminSettingsRepositoryError::DatabaseError(msg) => {
                UpdateSettingsError::RepositoryError(msg)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::in_memory::InMemorySettings;

    struct FailingSettings;

    #[async_trait]
    impl AdminSettingsRepository for FailingSettings {
        async fn get_or_create(&self) -> Result<AdminSettings, AdminSettingsRepositoryError> {
            Err(AdminSettingsRepositoryError::DatabaseError("down".into()))
        }

        async fn update(
            &self,
            _patch: SettingsPatch,
        ) -> Result<AdminSettings, AdminSettingsRepositoryError> {
            Err(AdminSettingsRepositoryError::DatabaseError("down".into()))
        }
    }

    #[tokio::test]
    async fn test_update_applies_only_given_flags() {
        let service = UpdateSettingsService::new(InMemorySettings::new(false, false));

        let first = service
            .execute(SettingsPatch {
                user_approval_required: Some(true),
                portfolio_approval_required: None,
            })
            .await
            .unwrap();
        assert!(first.user_approval_required);
        assert!(!first.portfolio_approval_required);

        let second = service
            .execute(SettingsPatch {
                user_approval_required: None,
                portfolio_approval_required: Some(true),
            })
            .await
            .unwrap();
        assert!(second.user_approval_required);
        assert!(second.portfolio_approval_required);
    }

    #[tokio::test]
    async fn test_update_maps_repository_error() {
        let service = UpdateSettingsService::new(FailingSettings);

        let err = service.execute(SettingsPatch::default()).await.unwrap_err();

        assert!(matches!(err, UpdateSettingsError::RepositoryError(msg) if msg == "down"));
    }
}
