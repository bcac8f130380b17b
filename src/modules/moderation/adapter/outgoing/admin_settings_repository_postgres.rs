use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use std::sync::Arc;
use tracing::info;

use super::sea_orm_entity::admin_settings::{
    ActiveModel as SettingsActiveModel, Entity as SettingsEntity, Model as SettingsModel,
};
use crate::moderation::application::domain::{AdminSettings, SettingsPatch};
use crate::moderation::application::ports::outgoing::{
    AdminSettingsRepository, AdminSettingsRepositoryError,
};

const SETTINGS_ROW_ID: i32 = 1;

#[derive(Clone, Debug)]
pub struct AdminSettingsRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AdminSettingsRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find(&self) -> Result<Option<SettingsModel>, AdminSettingsRepositoryError> {
        SettingsEntity::find_by_id(SETTINGS_ROW_ID)
            .one(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn load_or_insert(&self) -> Result<SettingsModel, AdminSettingsRepositoryError> {
        if let Some(model) = self.find().await? {
            return Ok(model);
        }

        let row = SettingsActiveModel {
            id: Set(SETTINGS_ROW_ID),
            user_approval_required: Set(false),
            portfolio_approval_required: Set(false),
            created_at: NotSet,
            updated_at: NotSet,
        };

        match row.insert(&*self.db).await {
            Ok(model) => {
                info!("Created default admin settings");
                Ok(model)
            }
            // A concurrent caller inserted the row first.
            Err(e) if is_unique_violation(&e) => self.find().await?.ok_or_else(|| {
                AdminSettingsRepositoryError::DatabaseError(
                    "admin settings row vanished after conflict".to_string(),
                )
            }),
            Err(e) => Err(map_db_err(e)),
        }
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    let msg = e.to_string().to_lowercase();
    msg.contains("23505") || msg.contains("duplicate key") || msg.contains("unique constraint")
}

fn map_db_err(e: DbErr) -> AdminSettingsRepositoryError {
    AdminSettingsRepositoryError::DatabaseError(e.to_string())
}

fn to_domain(model: SettingsModel) -> AdminSettings {
    AdminSettings {
        user_approval_required: model.user_approval_required,
        portfolio_approval_required: model.portfolio_approval_required,
        created_at: model.created_at.with_timezone(&chrono::Utc),
        updated_at: model.updated_at.with_timezone(&chrono::Utc),
    }
}

#[async_trait]
impl AdminSettingsRepository for AdminSettingsRepositoryPostgres {
    async fn get_or_create(&self) -> Result<AdminSettings, AdminSettingsRepositoryError> {
        self.load_or_insert().await.map(to_domain)
    }

    async fn update(
        &self,
        patch: SettingsPatch,
    ) -> Result<AdminSettings, AdminSettingsRepositoryError> {
        let current = self.load_or_insert().await?;

        if patch == SettingsPatch::default() {
            return Ok(to_domain(current));
        }

        let mut active: SettingsActiveModel = current.into();
        if let Some(v) = patch.user_approval_required {
            active.user_approval_required = Set(v);
        }
        if let Some(v) = patch.portfolio_approval_required {
            active.portfolio_approval_required = Set(v);
        }

        let updated = active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(to_domain(updated))
    }
}
