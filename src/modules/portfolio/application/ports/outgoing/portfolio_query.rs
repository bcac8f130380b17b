use async_trait::async_trait;
use uuid::Uuid;

use crate::portfolio::application::domain::{PortfolioRecord, PortfolioStatus, VersionRecord};
use crate::shared::api::{PageParams, SortOrder};

/// Which rows a listing may return before any other filter applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    PublishedOnly,
    /// Published rows plus every row owned by this user.
    PublishedOrOwnedBy(Uuid),
    Everything,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortfolioSortField {
    #[default]
    CreatedAt,
    Title,
    Category,
    Status,
}

impl PortfolioSortField {
    /// Allow-list; anything unknown sorts by creation time.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("title") => PortfolioSortField::Title,
            Some("category") => PortfolioSortField::Category,
            Some("status") => PortfolioSortField::Status,
            _ => PortfolioSortField::CreatedAt,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PortfolioListQuery {
    pub visibility: Visibility,
    pub status: Option<PortfolioStatus>,
    pub owner_id: Option<Uuid>,
    /// Exact match; callers drop the `all` wildcard.
    pub category: Option<String>,
    /// Case-insensitive match on title, author, description, tags or content.
    pub search: Option<String>,
    pub sort: PortfolioSortField,
    pub order: SortOrder,
    pub page: PageParams,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PortfolioQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupt portfolio row: {0}")]
    CorruptRow(String),
}

#[async_trait]
pub trait PortfolioQuery: Send + Sync {
    async fn find_by_id(
        &self,
        portfolio_id: Uuid,
    ) -> Result<Option<PortfolioRecord>, PortfolioQueryError>;

    async fn list(
        &self,
        query: &PortfolioListQuery,
    ) -> Result<(Vec<PortfolioRecord>, u64), PortfolioQueryError>;

    /// Newest first.
    async fn list_versions(
        &self,
        portfolio_id: Uuid,
    ) -> Result<Vec<VersionRecord>, PortfolioQueryError>;

    async fn find_version(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<Option<VersionRecord>, PortfolioQueryError>;

    async fn find_active_version(
        &self,
        portfolio_id: Uuid,
    ) -> Result<Option<VersionRecord>, PortfolioQueryError>;
}
