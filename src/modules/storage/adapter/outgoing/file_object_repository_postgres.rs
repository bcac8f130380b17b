use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::file_objects;
use crate::storage::application::domain::{FileObject, NewFileObject};
use crate::storage::application::ports::outgoing::{
    FileListQuery, FileObjectRepository, FileObjectRepositoryError,
};

#[derive(Clone)]
pub struct FileObjectRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl FileObjectRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FileObjectRepository for FileObjectRepositoryPostgres {
    async fn insert(&self, file: NewFileObject) -> Result<FileObject, FileObjectRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = file_objects::ActiveModel {
            id: Set(file.id),
            original_name: Set(file.original_name),
            storage_path: Set(file.storage_path),
            content_type: Set(file.content_type),
            file_size: Set(file.file_size),
            md5_hash: Set(file.md5_hash),
            config_id: Set(file.config_id),
            is_public: Set(file.is_public),
            tags: Set(serde_json::json!(file.tags)),
            uploaded_by: Set(file.uploaded_by),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&*self.db)
        .await
        .map_err(map_db_err)?;

        to_domain(model)
    }

    async fn find_live(&self, id: Uuid) -> Result<Option<FileObject>, FileObjectRepositoryError> {
        file_objects::Entity::find_by_id(id)
            .filter(file_objects::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(to_domain)
            .transpose()
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), FileObjectRepositoryError> {
        let now = Utc::now().fixed_offset();
        let res = file_objects::Entity::update_many()
            .col_expr(file_objects::Column::DeletedAt, Expr::value(now))
            .col_expr(file_objects::Column::UpdatedAt, Expr::value(now))
            .filter(file_objects::Column::Id.eq(id))
            .filter(file_objects::Column::DeletedAt.is_null())
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if res.rows_affected == 0 {
            return Err(FileObjectRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn count_by_config(&self, config_id: i32) -> Result<u64, FileObjectRepositoryError> {
        file_objects::Entity::find()
            .filter(file_objects::Column::ConfigId.eq(config_id))
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn list(
        &self,
        query: &FileListQuery,
    ) -> Result<(Vec<FileObject>, u64), FileObjectRepositoryError> {
        let mut select =
            file_objects::Entity::find().filter(file_objects::Column::DeletedAt.is_null());

        if let Some(user) = query.uploaded_by {
            select = select.filter(file_objects::Column::UploadedBy.eq(user));
        }
        if let Some(prefix) = &query.content_type {
            select = select.filter(file_objects::Column::ContentType.starts_with(prefix.trim()));
        }
        if let Some(is_public) = query.is_public {
            select = select.filter(file_objects::Column::IsPublic.eq(is_public));
        }

        let total = select.clone().count(&*self.db).await.map_err(map_db_err)?;

        let rows = select
            .order_by_desc(file_objects::Column::CreatedAt)
            .offset(query.page.offset())
            .limit(query.page.page_size)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let items = rows
            .into_iter()
            .map(to_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, total))
    }
}

fn to_domain(model: file_objects::Model) -> Result<FileObject, FileObjectRepositoryError> {
    let tags: BTreeMap<String, String> = serde_json::from_value(model.tags)
        .map_err(|e| FileObjectRepositoryError::CorruptRow(format!("tags: {}", e)))?;

    Ok(FileObject {
        id: model.id,
        original_name: model.original_name,
        storage_path: model.storage_path,
        content_type: model.content_type,
        file_size: model.file_size,
        md5_hash: model.md5_hash,
        config_id: model.config_id,
        is_public: model.is_public,
        tags,
        uploaded_by: model.uploaded_by,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        deleted_at: model.deleted_at.map(|d| d.with_timezone(&Utc)),
    })
}

fn map_db_err(e: DbErr) -> FileObjectRepositoryError {
    FileObjectRepositoryError::DatabaseError(e.to_string())
}
