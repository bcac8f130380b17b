use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use super::load_writable;
use crate::portfolio::application::domain::{Actor, PortfolioStatus};
use crate::portfolio::application::ports::incoming::use_cases::{
    HardDeletePortfolioUseCase, PortfolioError, SoftDeletePortfolioUseCase,
};
use crate::portfolio::application::ports::outgoing::{
    PortfolioChanges, PortfolioQuery, PortfolioRepository,
};

pub struct SoftDeletePortfolioService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> SoftDeletePortfolioService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> SoftDeletePortfolioUseCase for SoftDeletePortfolioService<Q, R>
where
    Q: PortfolioQuery + Send + Sync,
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(&self, actor: Actor, portfolio_id: Uuid) -> Result<(), PortfolioError> {
        load_writable(&self.query, portfolio_id, &actor).await?;

        let changes = PortfolioChanges {
            status: Some(PortfolioStatus::Deleted),
            ..Default::default()
        };
        self.repository.update(portfolio_id, changes).await?;

        info!(portfolio_id = %portfolio_id, actor_id = %actor.user_id, "Portfolio soft-deleted");
        Ok(())
    }
}

pub struct HardDeletePortfolioService<R>
where
    R: PortfolioRepository,
{
    repository: R,
}

impl<R> HardDeletePortfolioService<R>
where
    R: PortfolioRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> HardDeletePortfolioUseCase for HardDeletePortfolioService<R>
where
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(&self, portfolio_id: Uuid) -> Result<(), PortfolioError> {
        self.repository.hard_delete(portfolio_id).await?;
        info!(portfolio_id = %portfolio_id, "Portfolio removed");
        Ok(())
    }
}
