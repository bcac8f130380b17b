use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::warn;

use super::sea_orm_entity::storage_configs;
use crate::storage::application::domain::{StorageConfig, StorageConfigDraft};
use crate::storage::application::ports::outgoing::{
    ActivationHook, StorageConfigRepository, StorageConfigRepositoryError,
};

#[derive(Clone)]
pub struct StorageConfigRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl StorageConfigRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Clears `is_active` everywhere except on `keep`.
    async fn deactivate_others<C: ConnectionTrait>(
        conn: &C,
        keep: Option<i32>,
    ) -> Result<(), StorageConfigRepositoryError> {
        let mut update = storage_configs::Entity::update_many()
            .col_expr(storage_configs::Column::IsActive, Expr::value(false))
            .filter(storage_configs::Column::IsActive.eq(true));
        if let Some(id) = keep {
            update = update.filter(storage_configs::Column::Id.ne(id));
        }
        update.exec(conn).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn run_hook(
        model: storage_configs::Model,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError> {
        let config = to_domain(model);
        if config.is_active {
            hook.activated(&config)
                .await
                .map_err(StorageConfigRepositoryError::ActivationFailed)?;
        }
        Ok(config)
    }

    async fn create_in(
        txn: &DatabaseTransaction,
        draft: StorageConfigDraft,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError> {
        if draft.is_active {
            Self::deactivate_others(txn, None).await?;
        }

        let now = Utc::now().fixed_offset();
        let model = storage_configs::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(draft.name),
            endpoint: Set(draft.endpoint),
            access_key: Set(draft.access_key),
            secret_key: Set(draft.secret_key),
            bucket_name: Set(draft.bucket_name),
            use_ssl: Set(draft.use_ssl),
            is_private: Set(draft.is_private),
            region: Set(draft.region),
            url_expiry: Set(draft.url_expiry),
            is_active: Set(draft.is_active),
            description: Set(draft.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await
        .map_err(map_write_err)?;

        Self::run_hook(model, hook).await
    }

    async fn update_in(
        txn: &DatabaseTransaction,
        id: i32,
        draft: StorageConfigDraft,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError> {
        let existing = storage_configs::Entity::find_by_id(id)
            .one(txn)
            .await
            .map_err(map_db_err)?
            .ok_or(StorageConfigRepositoryError::NotFound)?;

        if draft.is_active {
            Self::deactivate_others(txn, Some(id)).await?;
        }

        let mut row: storage_configs::ActiveModel = existing.into();
        row.name = Set(draft.name);
        row.endpoint = Set(draft.endpoint);
        row.access_key = Set(draft.access_key);
        row.secret_key = Set(draft.secret_key);
        row.bucket_name = Set(draft.bucket_name);
        row.use_ssl = Set(draft.use_ssl);
        row.is_private = Set(draft.is_private);
        row.region = Set(draft.region);
        row.url_expiry = Set(draft.url_expiry);
        row.is_active = Set(draft.is_active);
        row.description = Set(draft.description);

        let model = row.update(txn).await.map_err(map_write_err)?;
        Self::run_hook(model, hook).await
    }

    async fn activate_in(
        txn: &DatabaseTransaction,
        id: i32,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError> {
        Self::deactivate_others(txn, None).await?;

        let target = storage_configs::Entity::find_by_id(id)
            .one(txn)
            .await
            .map_err(map_db_err)?
            .ok_or(StorageConfigRepositoryError::NotFound)?;

        let mut row: storage_configs::ActiveModel = target.into();
        row.is_active = Set(true);
        let model = row.update(txn).await.map_err(map_db_err)?;

        Self::run_hook(model, hook).await
    }
}

async fn finish<T>(
    txn: DatabaseTransaction,
    result: Result<T, StorageConfigRepositoryError>,
) -> Result<T, StorageConfigRepositoryError> {
    match result {
        Ok(value) => {
            txn.commit().await.map_err(map_db_err)?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                warn!(error = %rollback, "Storage config rollback failed");
            }
            Err(e)
        }
    }
}

#[async_trait]
impl StorageConfigRepository for StorageConfigRepositoryPostgres {
    async fn list(&self) -> Result<Vec<StorageConfig>, StorageConfigRepositoryError> {
        let rows = storage_configs::Entity::find()
            .order_by_asc(storage_configs::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<StorageConfig>, StorageConfigRepositoryError> {
        let row = storage_configs::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(to_domain))
    }

    async fn find_active(&self) -> Result<Option<StorageConfig>, StorageConfigRepositoryError> {
        let row = storage_configs::Entity::find()
            .filter(storage_configs::Column::IsActive.eq(true))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(to_domain))
    }

    async fn create(
        &self,
        draft: StorageConfigDraft,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let result = Self::create_in(&txn, draft, hook).await;
        finish(txn, result).await
    }

    async fn update(
        &self,
        id: i32,
        draft: StorageConfigDraft,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let result = Self::update_in(&txn, id, draft, hook).await;
        finish(txn, result).await
    }

    async fn delete(&self, id: i32) -> Result<(), StorageConfigRepositoryError> {
        let res = storage_configs::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if res.rows_affected == 0 {
            return Err(StorageConfigRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn activate(
        &self,
        id: i32,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let result = Self::activate_in(&txn, id, hook).await;
        finish(txn, result).await
    }
}

fn to_domain(model: storage_configs::Model) -> StorageConfig {
    StorageConfig {
        id: model.id,
        name: model.name,
        endpoint: model.endpoint,
        access_key: model.access_key,
        secret_key: model.secret_key,
        bucket_name: model.bucket_name,
        use_ssl: model.use_ssl,
        is_private: model.is_private,
        region: model.region,
        url_expiry: model.url_expiry,
        is_active: model.is_active,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    let msg = e.to_string().to_lowercase();
    msg.contains("23505") || msg.contains("duplicate") || msg.contains("unique")
}

fn map_write_err(e: DbErr) -> StorageConfigRepositoryError {
    if is_unique_violation(&e) {
        StorageConfigRepositoryError::NameTaken
    } else {
        map_db_err(e)
    }
}

fn map_db_err(e: DbErr) -> StorageConfigRepositoryError {
    StorageConfigRepositoryError::DatabaseError(e.to_string())
}
