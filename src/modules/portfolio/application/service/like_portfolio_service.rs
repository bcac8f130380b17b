use async_trait::async_trait;
use uuid::Uuid;

use crate::portfolio::application::ports::incoming::use_cases::{
    LikePortfolioUseCase, PortfolioError,
};
use crate::portfolio::application::ports::outgoing::PortfolioRepository;

pub struct LikePortfolioService<R>
where
    R: PortfolioRepository,
{
    repository: R,
}

impl<R> LikePortfolioService<R>
where
    R: PortfolioRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> LikePortfolioUseCase for LikePortfolioService<R>
where
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(&self, portfolio_id: Uuid) -> Result<i32, PortfolioError> {
        Ok(self.repository.like(portfolio_id).await?)
    }
}
