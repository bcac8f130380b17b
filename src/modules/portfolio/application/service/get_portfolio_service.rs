use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use super::{load_visible, with_image_url};
use crate::portfolio::application::domain::{Actor, PortfolioStatus};
use crate::portfolio::application::ports::incoming::use_cases::{
    GetPortfolioUseCase, PortfolioError, PortfolioView,
};
use crate::portfolio::application::ports::outgoing::{
    ImageUrlResolver, PortfolioQuery, PortfolioRepository,
};

pub struct GetPortfolioService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    query: Q,
    repository: R,
    images: Arc<dyn ImageUrlResolver>,
}

impl<Q, R> GetPortfolioService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    pub fn new(query: Q, repository: R, images: Arc<dyn ImageUrlResolver>) -> Self {
        Self {
            query,
            repository,
            images,
        }
    }
}

#[async_trait]
impl<Q, R> GetPortfolioUseCase for GetPortfolioService<Q, R>
where
    Q: PortfolioQuery + Send + Sync,
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(
        &self,
        portfolio_id: Uuid,
        viewer: Option<Actor>,
    ) -> Result<PortfolioView, PortfolioError> {
        let mut portfolio = load_visible(&self.query, portfolio_id, viewer.as_ref()).await?;

        if portfolio.status == PortfolioStatus::Published {
            match self.repository.increment_views(portfolio_id).await {
                Ok(()) => portfolio.views += 1,
                Err(e) => warn!(portfolio_id = %portfolio_id, error = %e, "Failed to count view"),
            }
        }

        let active_version = self.query.find_active_version(portfolio_id).await?;

        let view = PortfolioView {
            active_version,
            ..PortfolioView::bare(portfolio)
        };
        Ok(with_image_url(self.images.as_ref(), view).await)
    }
}
