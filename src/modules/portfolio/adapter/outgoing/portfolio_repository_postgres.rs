use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::portfolio_query_postgres::{portfolio_from_model, version_from_model};
use super::sea_orm_entity::{portfolio_versions, portfolios};
use crate::portfolio::application::domain::versioning::next_label;
use crate::portfolio::application::domain::{PortfolioRecord, PortfolioStatus, VersionRecord};
use crate::portfolio::application::ports::outgoing::{
    NewPortfolio, NewVersion, PortfolioChanges, PortfolioRepository, PortfolioRepositoryError,
    VersionChanges, VersionDraft,
};

#[derive(Clone)]
pub struct PortfolioRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PortfolioRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn insert_with_versions(
        txn: &DatabaseTransaction,
        portfolio: NewPortfolio,
        versions: Vec<NewVersion>,
    ) -> Result<(PortfolioRecord, Vec<VersionRecord>), PortfolioRepositoryError> {
        let now = Utc::now().fixed_offset();
        let row = portfolios::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(portfolio.owner_id),
            title: Set(portfolio.title),
            author: Set(portfolio.author),
            description: Set(portfolio.description),
            content: Set(portfolio.content),
            category: Set(portfolio.category),
            tags: Set(serde_json::json!(portfolio.tags)),
            image_object_id: Set(portfolio.image_object_id),
            ai_level: Set(portfolio.ai_level),
            likes: Set(0),
            views: Set(0),
            status: Set(portfolio.status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await
        .map_err(map_db_err)?;

        let mut created = Vec::with_capacity(versions.len());
        for (i, version) in versions.into_iter().enumerate() {
            // Strictly increasing: label derivation orders by creation time.
            let stamp = now + Duration::microseconds(i as i64);
            let model = portfolio_versions::ActiveModel {
                id: Set(Uuid::new_v4()),
                portfolio_id: Set(row.id),
                version: Set(version.label),
                title: Set(version.title),
                description: Set(version.description),
                html_content: Set(version.html_content),
                thumbnail: Set(version.thumbnail),
                change_log: Set(version.change_log),
                is_active: Set(version.is_active),
                created_at: Set(stamp),
                updated_at: Set(stamp),
            }
            .insert(txn)
            .await
            .map_err(map_db_err)?;
            created.push(version_from_model(model));
        }

        let record = portfolio_from_model(row).map_err(PortfolioRepositoryError::SerializationError)?;
        Ok((record, created))
    }

    async fn deactivate_all<C: ConnectionTrait>(
        conn: &C,
        portfolio_id: Uuid,
    ) -> Result<(), PortfolioRepositoryError> {
        portfolio_versions::Entity::update_many()
            .col_expr(portfolio_versions::Column::IsActive, Expr::value(false))
            .filter(portfolio_versions::Column::PortfolioId.eq(portfolio_id))
            .filter(portfolio_versions::Column::IsActive.eq(true))
            .exec(conn)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn append_locked(
        txn: &DatabaseTransaction,
        portfolio_id: Uuid,
        draft: VersionDraft,
    ) -> Result<VersionRecord, PortfolioRepositoryError> {
        portfolios::Entity::find_by_id(portfolio_id)
            .lock_exclusive()
            .one(txn)
            .await
            .map_err(map_db_err)?
            .ok_or(PortfolioRepositoryError::NotFound)?;

        let latest = portfolio_versions::Entity::find()
            .filter(portfolio_versions::Column::PortfolioId.eq(portfolio_id))
            .order_by_desc(portfolio_versions::Column::CreatedAt)
            .one(txn)
            .await
            .map_err(map_db_err)?;

        if draft.is_active {
            Self::deactivate_all(txn, portfolio_id).await?;
        }

        let now = Utc::now().fixed_offset();
        let model = portfolio_versions::ActiveModel {
            id: Set(Uuid::new_v4()),
            portfolio_id: Set(portfolio_id),
            version: Set(next_label(latest.as_ref().map(|v| v.version.as_str()))),
            title: Set(draft.title),
            description: Set(draft.description),
            html_content: Set(draft.html_content),
            thumbnail: Set(draft.thumbnail),
            change_log: Set(draft.change_log),
            is_active: Set(draft.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await
        .map_err(map_db_err)?;

        Ok(version_from_model(model))
    }

    async fn load_version<C: ConnectionTrait>(
        conn: &C,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<portfolio_versions::Model, PortfolioRepositoryError> {
        portfolio_versions::Entity::find_by_id(version_id)
            .filter(portfolio_versions::Column::PortfolioId.eq(portfolio_id))
            .one(conn)
            .await
            .map_err(map_db_err)?
            .ok_or(PortfolioRepositoryError::VersionNotFound)
    }

    async fn update_version_in(
        txn: &DatabaseTransaction,
        portfolio_id: Uuid,
        version_id: Uuid,
        changes: VersionChanges,
    ) -> Result<VersionRecord, PortfolioRepositoryError> {
        let existing = Self::load_version(txn, portfolio_id, version_id).await?;

        if changes.activate && !existing.is_active {
            Self::deactivate_all(txn, portfolio_id).await?;
        }

        let mut active: portfolio_versions::ActiveModel = existing.into();
        if let Some(v) = changes.title {
            active.title = Set(v);
        }
        if let Some(v) = changes.description {
            active.description = Set(v);
        }
        if let Some(v) = changes.html_content {
            active.html_content = Set(v);
        }
        if let Some(v) = changes.thumbnail {
            active.thumbnail = Set(v);
        }
        if let Some(v) = changes.change_log {
            active.change_log = Set(v);
        }
        if changes.activate {
            active.is_active = Set(true);
        }

        let updated = active.update(txn).await.map_err(map_db_err)?;
        Ok(version_from_model(updated))
    }

    async fn activate_in(
        txn: &DatabaseTransaction,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<(), PortfolioRepositoryError> {
        Self::load_version(txn, portfolio_id, version_id).await?;
        Self::deactivate_all(txn, portfolio_id).await?;

        portfolio_versions::Entity::update_many()
            .col_expr(portfolio_versions::Column::IsActive, Expr::value(true))
            .col_expr(
                portfolio_versions::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(portfolio_versions::Column::Id.eq(version_id))
            .exec(txn)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}

/// Commits on success, rolls back on failure.
async fn finish<T>(
    txn: DatabaseTransaction,
    result: Result<T, PortfolioRepositoryError>,
) -> Result<T, PortfolioRepositoryError> {
    match result {
        Ok(value) => {
            txn.commit().await.map_err(map_db_err)?;
            Ok(value)
        }
        Err(e) => {
            let _ = txn.rollback().await;
            Err(e)
        }
    }
}

#[async_trait]
impl PortfolioRepository for PortfolioRepositoryPostgres {
    async fn create(
        &self,
        portfolio: NewPortfolio,
        versions: Vec<NewVersion>,
    ) -> Result<(PortfolioRecord, Vec<VersionRecord>), PortfolioRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let result = Self::insert_with_versions(&txn, portfolio, versions).await;
        finish(txn, result).await
    }

    async fn update(
        &self,
        portfolio_id: Uuid,
        changes: PortfolioChanges,
    ) -> Result<PortfolioRecord, PortfolioRepositoryError> {
        let existing = portfolios::Entity::find_by_id(portfolio_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(PortfolioRepositoryError::NotFound)?;

        let mut active: portfolios::ActiveModel = existing.into();
        if let Some(v) = changes.title {
            active.title = Set(v);
        }
        if let Some(v) = changes.author {
            active.author = Set(v);
        }
        if let Some(v) = changes.description {
            active.description = Set(v);
        }
        if let Some(v) = changes.content {
            active.content = Set(v);
        }
        if let Some(v) = changes.category {
            active.category = Set(v);
        }
        if let Some(v) = changes.tags {
            active.tags = Set(serde_json::json!(v));
        }
        if let Some(v) = changes.image_object_id {
            active.image_object_id = Set(Some(v));
        }
        if let Some(v) = changes.ai_level {
            active.ai_level = Set(v);
        }
        if let Some(v) = changes.status {
            active.status = Set(v.as_str().to_string());
        }

        let updated = active.update(&*self.db).await.map_err(map_db_err)?;
        portfolio_from_model(updated).map_err(PortfolioRepositoryError::SerializationError)
    }

    async fn hard_delete(&self, portfolio_id: Uuid) -> Result<(), PortfolioRepositoryError> {
        let res = portfolios::Entity::delete_by_id(portfolio_id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if res.rows_affected == 0 {
            return Err(PortfolioRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn increment_views(&self, portfolio_id: Uuid) -> Result<(), PortfolioRepositoryError> {
        let res = portfolios::Entity::update_many()
            .col_expr(
                portfolios::Column::Views,
                Expr::col(portfolios::Column::Views).add(1),
            )
            .filter(portfolios::Column::Id.eq(portfolio_id))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if res.rows_affected == 0 {
            return Err(PortfolioRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn like(&self, portfolio_id: Uuid) -> Result<i32, PortfolioRepositoryError> {
        let rows = portfolios::Entity::update_many()
            .col_expr(
                portfolios::Column::Likes,
                Expr::col(portfolios::Column::Likes).add(1),
            )
            .filter(portfolios::Column::Id.eq(portfolio_id))
            .filter(portfolios::Column::Status.eq(PortfolioStatus::Published.as_str()))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter()
            .next()
            .map(|m| m.likes)
            .ok_or(PortfolioRepositoryError::NotFound)
    }

    async fn archive_by_owner(&self, owner_id: Uuid) -> Result<u64, PortfolioRepositoryError> {
        let deleted = PortfolioStatus::Deleted.as_str();
        let res = portfolios::Entity::update_many()
            .col_expr(portfolios::Column::Status, Expr::value(deleted))
            .col_expr(
                portfolios::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(portfolios::Column::OwnerId.eq(owner_id))
            .filter(portfolios::Column::Status.ne(deleted))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(res.rows_affected)
    }

    async fn append_version(
        &self,
        portfolio_id: Uuid,
        draft: VersionDraft,
    ) -> Result<VersionRecord, PortfolioRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let result = Self::append_locked(&txn, portfolio_id, draft).await;
        finish(txn, result).await
    }

    async fn update_version(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
        changes: VersionChanges,
    ) -> Result<VersionRecord, PortfolioRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let result = Self::update_version_in(&txn, portfolio_id, version_id, changes).await;
        finish(txn, result).await
    }

    async fn activate_version(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<(), PortfolioRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let result = Self::activate_in(&txn, portfolio_id, version_id).await;
        finish(txn, result).await
    }

    async fn delete_version(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<(), PortfolioRepositoryError> {
        let version = Self::load_version(&*self.db, portfolio_id, version_id).await?;
        if version.is_active {
            return Err(PortfolioRepositoryError::VersionActive);
        }

        // The active flag is re-checked by the delete itself.
        let res = portfolio_versions::Entity::delete_many()
            .filter(portfolio_versions::Column::Id.eq(version_id))
            .filter(portfolio_versions::Column::IsActive.eq(false))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if res.rows_affected == 0 {
            return Err(PortfolioRepositoryError::VersionActive);
        }
        Ok(())
    }
}

fn map_db_err(e: DbErr) -> PortfolioRepositoryError {
    PortfolioRepositoryError::DatabaseError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::adapter::outgoing::portfolio_query_postgres::tests::{
        portfolio_row, version_row,
    };
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_create_inserts_portfolio_and_versions() {
        let id = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![portfolio_row(id, owner, "published")]])
            .append_query_results(vec![vec![version_row(id, "v1.0", true)]])
            .append_query_results(vec![vec![version_row(id, "v1.1", false)]])
            .into_connection();
        let repo = PortfolioRepositoryPostgres::new(Arc::new(db));

        let version = |label: &str, active: bool| NewVersion {
            label: label.into(),
            title: "t".into(),
            description: String::new(),
            html_content: String::new(),
            thumbnail: String::new(),
            change_log: String::new(),
            is_active: active,
        };
        let (record, versions) = repo
            .create(
                NewPortfolio {
                    owner_id: owner,
                    title: "Landing page".into(),
                    author: "Jane".into(),
                    description: String::new(),
                    content: String::new(),
                    category: "web".into(),
                    tags: vec!["react".into()],
                    image_object_id: None,
                    ai_level: "AI assisted".into(),
                    status: PortfolioStatus::Published,
                },
                vec![version("v1.0", true), version("v1.1", false)],
            )
            .await
            .unwrap();

        assert_eq!(record.id, id);
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[1].label, "v1.1");
    }

    #[tokio::test]
    async fn test_append_version_derives_label_from_latest() {
        let pid = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![portfolio_row(pid, Uuid::new_v4(), "published")]])
            .append_query_results(vec![vec![version_row(pid, "v2.9", true)]])
            .append_query_results(vec![vec![version_row(pid, "v2.10", false)]])
            .into_connection();
        let repo = PortfolioRepositoryPostgres::new(Arc::new(db));

        let created = repo
            .append_version(
                pid,
                VersionDraft {
                    title: "Next".into(),
                    description: String::new(),
                    html_content: String::new(),
                    thumbnail: String::new(),
                    change_log: String::new(),
                    is_active: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.label, "v2.10");
    }

    #[tokio::test]
    async fn test_append_version_missing_portfolio() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<portfolios::Model>::new()])
            .into_connection();
        let repo = PortfolioRepositoryPostgres::new(Arc::new(db));

        let err = repo
            .append_version(
                Uuid::new_v4(),
                VersionDraft {
                    title: "x".into(),
                    description: String::new(),
                    html_content: String::new(),
                    thumbnail: String::new(),
                    change_log: String::new(),
                    is_active: true,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PortfolioRepositoryError::NotFound));
    }

    fn executed_sql(db: Arc<DatabaseConnection>) -> Vec<String> {
        Arc::try_unwrap(db)
            .ok()
            .expect("repository dropped")
            .into_transaction_log()
            .iter()
            .flat_map(|t| t.statements().iter().map(|stmt| stmt.sql.clone()))
            .collect()
    }

    fn version_updates(sql: &[String]) -> Vec<&String> {
        sql.iter()
            .filter(|s| s.starts_with(r#"UPDATE "portfolio_versions""#))
            .collect()
    }

    #[tokio::test]
    async fn test_activate_version_missing_version() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<portfolio_versions::Model>::new()])
            .into_connection();
        let repo = PortfolioRepositoryPostgres::new(Arc::new(db));

        let err = repo
            .activate_version(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, PortfolioRepositoryError::VersionNotFound));
    }

    #[tokio::test]
    async fn test_activate_version_clears_siblings_then_sets_target() {
        let pid = Uuid::new_v4();
        let target = version_row(pid, "v1.1", false);
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![target.clone()]])
                .append_exec_results([exec(1), exec(1)])
                .into_connection(),
        );
        let repo = PortfolioRepositoryPostgres::new(db.clone());

        repo.activate_version(pid, target.id).await.unwrap();
        drop(repo);

        let sql = executed_sql(db);
        assert_eq!(sql.first().map(String::as_str), Some("BEGIN"));
        assert_eq!(sql.last().map(String::as_str), Some("COMMIT"));
        let updates = version_updates(&sql);
        assert_eq!(updates.len(), 2);
        assert!(updates[0].contains(r#""portfolio_versions"."portfolio_id""#));
        assert!(updates[0].contains(r#""portfolio_versions"."is_active""#));
        assert!(updates[1].contains(r#""portfolio_versions"."id""#));
        assert!(!updates[1].contains(r#""portfolio_versions"."portfolio_id""#));
    }

    #[tokio::test]
    async fn test_update_version_with_activate_clears_siblings_first() {
        let pid = Uuid::new_v4();
        let existing = version_row(pid, "v1.0", false);
        let updated = portfolio_versions::Model {
            is_active: true,
            title: "Renamed".into(),
            ..existing.clone()
        };
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![existing.clone()]])
                .append_exec_results([exec(1)])
                .append_query_results(vec![vec![updated]])
                .into_connection(),
        );
        let repo = PortfolioRepositoryPostgres::new(db.clone());

        let record = repo
            .update_version(
                pid,
                existing.id,
                VersionChanges {
                    title: Some("Renamed".into()),
                    activate: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        drop(repo);

        assert!(record.is_active);
        assert_eq!(record.title, "Renamed");
        let sql = executed_sql(db);
        let updates = version_updates(&sql);
        assert_eq!(updates.len(), 2);
        assert!(updates[0].contains(r#""portfolio_versions"."portfolio_id""#));
        assert!(updates[1].contains(r#""is_active""#));
        assert_eq!(sql.last().map(String::as_str), Some("COMMIT"));
    }

    #[tokio::test]
    async fn test_update_version_missing_version() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<portfolio_versions::Model>::new()])
            .into_connection();
        let repo = PortfolioRepositoryPostgres::new(Arc::new(db));

        let err = repo
            .update_version(
                Uuid::new_v4(),
                Uuid::new_v4(),
                VersionChanges {
                    activate: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PortfolioRepositoryError::VersionNotFound));
    }

    #[tokio::test]
    async fn test_delete_active_version_refused() {
        let pid = Uuid::new_v4();
        let active = version_row(pid, "v1.0", true);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![active.clone()]])
            .into_connection();
        let repo = PortfolioRepositoryPostgres::new(Arc::new(db));

        let err = repo.delete_version(pid, active.id).await.unwrap_err();
        assert!(matches!(err, PortfolioRepositoryError::VersionActive));
    }

    #[tokio::test]
    async fn test_delete_inactive_version() {
        let pid = Uuid::new_v4();
        let inactive = version_row(pid, "v1.1", false);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![inactive.clone()]])
            .append_exec_results([exec(1)])
            .into_connection();
        let repo = PortfolioRepositoryPostgres::new(Arc::new(db));

        repo.delete_version(pid, inactive.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_hard_delete_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .into_connection();
        let repo = PortfolioRepositoryPostgres::new(Arc::new(db));

        let err = repo.hard_delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, PortfolioRepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_like_unpublished_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<portfolios::Model>::new()])
            .into_connection();
        let repo = PortfolioRepositoryPostgres::new(Arc::new(db));

        let err = repo.like(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, PortfolioRepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_archive_by_owner_counts_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(4)])
            .into_connection();
        let repo = PortfolioRepositoryPostgres::new(Arc::new(db));

        assert_eq!(repo.archive_by_owner(Uuid::new_v4()).await.unwrap(), 4);
    }
}
