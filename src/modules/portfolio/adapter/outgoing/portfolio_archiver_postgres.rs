use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::{PortfolioArchiver, PortfolioArchiverError};
use crate::portfolio::application::ports::outgoing::PortfolioRepository;

/// Serves account removal by retiring the owner's portfolios through the portfolio repository.
#[derive(Clone)]
pub struct PortfolioArchiverAdapter<R>
where
    R: PortfolioRepository,
{
    repository: Arc<R>,
}

impl<R> PortfolioArchiverAdapter<R>
where
    R: PortfolioRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> PortfolioArchiver for PortfolioArchiverAdapter<R>
where
    R: PortfolioRepository + Send + Sync,
{
    async fn archive_all_for_owner(&self, owner_id: Uuid) -> Result<u64, PortfolioArchiverError> {
        self.repository
            .archive_by_owner(owner_id)
            .await
            .map_err(|e| PortfolioArchiverError::DatabaseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::application::domain::PortfolioStatus;
    use crate::tests::support::in_memory::InMemoryPortfolios;

    #[tokio::test]
    async fn test_archives_only_owner_rows() {
        let repo = InMemoryPortfolios::default();
        let owner = Uuid::new_v4();
        let mine = repo.seed(owner, PortfolioStatus::Published);
        repo.seed(owner, PortfolioStatus::Draft);
        let other = repo.seed(Uuid::new_v4(), PortfolioStatus::Published);

        let archiver = PortfolioArchiverAdapter::new(Arc::new(repo.clone()));
        assert_eq!(archiver.archive_all_for_owner(owner).await.unwrap(), 2);

        assert_eq!(repo.portfolio(mine).unwrap().status, PortfolioStatus::Deleted);
        assert_eq!(
            repo.portfolio(other).unwrap().status,
            PortfolioStatus::Published
        );
    }
}
