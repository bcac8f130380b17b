use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum PortfolioArchiverError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Lets account removal retire the portfolios a user owns without touching their rows'
/// content. Implemented by the portfolio module.
#[async_trait]
pub trait PortfolioArchiver: Send + Sync {
    /// Marks every portfolio owned by `owner_id` as `deleted`; returns how many changed.
    async fn archive_all_for_owner(&self, owner_id: Uuid) -> Result<u64, PortfolioArchiverError>;
}
