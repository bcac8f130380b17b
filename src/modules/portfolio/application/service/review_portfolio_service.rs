use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::with_image_url;
use crate::portfolio::application::domain::PortfolioStatus;
use crate::portfolio::application::ports::incoming::use_cases::{
    PortfolioError, PortfolioView, ReviewPortfolioUseCase,
};
use crate::portfolio::application::ports::outgoing::{
    ImageUrlResolver, PortfolioChanges, PortfolioRepository,
};

pub struct ReviewPortfolioService<R>
where
    R: PortfolioRepository,
{
    repository: R,
    images: Arc<dyn ImageUrlResolver>,
}

impl<R> ReviewPortfolioService<R>
where
    R: PortfolioRepository,
{
    pub fn new(repository: R, images: Arc<dyn ImageUrlResolver>) -> Self {
        Self { repository, images }
    }
}

#[async_trait]
impl<R> ReviewPortfolioUseCase for ReviewPortfolioService<R>
where
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(
        &self,
        portfolio_id: Uuid,
        status: PortfolioStatus,
    ) -> Result<PortfolioView, PortfolioError> {
        if !matches!(
            status,
            PortfolioStatus::Published | PortfolioStatus::Rejected
        ) {
            return Err(PortfolioError::Validation(
                "Status must be published or rejected".to_string(),
            ));
        }

        let changes = PortfolioChanges {
            status: Some(status),
            ..Default::default()
        };
        let updated = self.repository.update(portfolio_id, changes).await?;

        info!(portfolio_id = %portfolio_id, status = %status, "Portfolio reviewed");
        Ok(with_image_url(self.images.as_ref(), PortfolioView::bare(updated)).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::in_memory::{InMemoryPortfolios, NoImages};

    #[tokio::test]
    async fn test_review_sets_status() {
        let repo = InMemoryPortfolios::default();
        let id = repo.seed(Uuid::new_v4(), PortfolioStatus::Draft);
        let svc = ReviewPortfolioService::new(repo.clone(), Arc::new(NoImages));

        let view = svc.execute(id, PortfolioStatus::Published).await.unwrap();
        assert_eq!(view.portfolio.status, PortfolioStatus::Published);

        let err = svc.execute(id, PortfolioStatus::Deleted).await.unwrap_err();
        assert!(matches!(err, PortfolioError::Validation(_)));

        let missing = svc
            .execute(Uuid::new_v4(), PortfolioStatus::Rejected)
            .await
            .unwrap_err();
        assert_eq!(missing, PortfolioError::NotFound);
    }
}
