use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::{portfolio_versions, portfolios};
use crate::portfolio::application::domain::{PortfolioRecord, PortfolioStatus, VersionRecord};
use crate::portfolio::application::ports::outgoing::{
    PortfolioListQuery, PortfolioQuery, PortfolioQueryError, PortfolioSortField, Visibility,
};
use crate::shared::api::SortOrder;

#[derive(Clone)]
pub struct PortfolioQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PortfolioQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn visibility_condition(visibility: Visibility) -> Option<Condition> {
    let published = portfolios::Column::Status.eq(PortfolioStatus::Published.as_str());
    match visibility {
        Visibility::PublishedOnly => Some(Condition::all().add(published)),
        Visibility::PublishedOrOwnedBy(owner) => Some(
            Condition::any()
                .add(published)
                .add(portfolios::Column::OwnerId.eq(owner)),
        ),
        Visibility::Everything => None,
    }
}

fn search_condition(search: &str) -> Condition {
    let pattern = format!("%{}%", search.trim());
    Condition::any()
        .add(Expr::col(portfolios::Column::Title).ilike(&pattern))
        .add(Expr::col(portfolios::Column::Author).ilike(&pattern))
        .add(Expr::col(portfolios::Column::Description).ilike(&pattern))
        .add(Expr::col(portfolios::Column::Content).ilike(&pattern))
        .add(
            Expr::expr(Expr::col(portfolios::Column::Tags).cast_as(Alias::new("text")))
                .ilike(&pattern),
        )
}

fn sort_column(field: PortfolioSortField) -> portfolios::Column {
    match field {
        PortfolioSortField::CreatedAt => portfolios::Column::CreatedAt,
        PortfolioSortField::Title => portfolios::Column::Title,
        PortfolioSortField::Category => portfolios::Column::Category,
        PortfolioSortField::Status => portfolios::Column::Status,
    }
}

#[async_trait]
impl PortfolioQuery for PortfolioQueryPostgres {
    async fn find_by_id(
        &self,
        portfolio_id: Uuid,
    ) -> Result<Option<PortfolioRecord>, PortfolioQueryError> {
        portfolios::Entity::find_by_id(portfolio_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(|m| portfolio_from_model(m).map_err(PortfolioQueryError::CorruptRow))
            .transpose()
    }

    async fn list(
        &self,
        query: &PortfolioListQuery,
    ) -> Result<(Vec<PortfolioRecord>, u64), PortfolioQueryError> {
        let mut select = portfolios::Entity::find();

        if let Some(condition) = visibility_condition(query.visibility) {
            select = select.filter(condition);
        }
        if let Some(status) = query.status {
            select = select.filter(portfolios::Column::Status.eq(status.as_str()));
        }
        if let Some(owner) = query.owner_id {
            select = select.filter(portfolios::Column::OwnerId.eq(owner));
        }
        if let Some(category) = &query.category {
            select = select.filter(portfolios::Column::Category.eq(category.as_str()));
        }
        if let Some(search) = &query.search {
            select = select.filter(search_condition(search));
        }

        let order = match query.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        select = select
            .order_by(sort_column(query.sort), order.clone())
            .order_by(portfolios::Column::Id, order);

        let total = select.clone().count(&*self.db).await.map_err(map_db_err)?;

        let rows = select
            .offset(query.page.offset())
            .limit(query.page.page_size)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let items = rows
            .into_iter()
            .map(|m| portfolio_from_model(m).map_err(PortfolioQueryError::CorruptRow))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, total))
    }

    async fn list_versions(
        &self,
        portfolio_id: Uuid,
    ) -> Result<Vec<VersionRecord>, PortfolioQueryError> {
        let rows = portfolio_versions::Entity::find()
            .filter(portfolio_versions::Column::PortfolioId.eq(portfolio_id))
            .order_by_desc(portfolio_versions::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(version_from_model).collect())
    }

    async fn find_version(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<Option<VersionRecord>, PortfolioQueryError> {
        let row = portfolio_versions::Entity::find_by_id(version_id)
            .filter(portfolio_versions::Column::PortfolioId.eq(portfolio_id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(version_from_model))
    }

    async fn find_active_version(
        &self,
        portfolio_id: Uuid,
    ) -> Result<Option<VersionRecord>, PortfolioQueryError> {
        let row = portfolio_versions::Entity::find()
            .filter(portfolio_versions::Column::PortfolioId.eq(portfolio_id))
            .filter(portfolio_versions::Column::IsActive.eq(true))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(version_from_model))
    }
}

// ──── Row mapping ────

pub(super) fn portfolio_from_model(model: portfolios::Model) -> Result<PortfolioRecord, String> {
    let status = model.status.parse::<PortfolioStatus>()?;
    let tags: Vec<String> =
        serde_json::from_value(model.tags).map_err(|e| format!("tags: {}", e))?;

    Ok(PortfolioRecord {
        id: model.id,
        owner_id: model.owner_id,
        title: model.title,
        author: model.author,
        description: model.description,
        content: model.content,
        category: model.category,
        tags,
        image_object_id: model.image_object_id,
        ai_level: model.ai_level,
        likes: model.likes,
        views: model.views,
        status,
        created_at: model.created_at.with_timezone(&chrono::Utc),
        updated_at: model.updated_at.with_timezone(&chrono::Utc),
    })
}

pub(super) fn version_from_model(model: portfolio_versions::Model) -> VersionRecord {
    VersionRecord {
        id: model.id,
        portfolio_id: model.portfolio_id,
        label: model.version,
        title: model.title,
        description: model.description,
        html_content: model.html_content,
        thumbnail: model.thumbnail,
        change_log: model.change_log,
        is_active: model.is_active,
        created_at: model.created_at.with_timezone(&chrono::Utc),
        updated_at: model.updated_at.with_timezone(&chrono::Utc),
    }
}

fn map_db_err(e: DbErr) -> PortfolioQueryError {
    PortfolioQueryError::DatabaseError(e.to_string())
}
