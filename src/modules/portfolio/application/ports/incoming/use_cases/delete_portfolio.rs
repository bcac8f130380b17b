use async_trait::async_trait;
use uuid::Uuid;

use super::PortfolioError;
use crate::portfolio::application::domain::Actor;

/// Owner-side delete: the row stays with status `deleted`.
#[async_trait]
pub trait SoftDeletePortfolioUseCase: Send + Sync {
    async fn execute(&self, actor: Actor, portfolio_id: Uuid) -> Result<(), PortfolioError>;
}

/// Admin delete: the row and its versions are removed.
#[async_trait]
pub trait HardDeletePortfolioUseCase: Send + Sync {
    async fn execute(&self, portfolio_id: Uuid) -> Result<(), PortfolioError>;
}
