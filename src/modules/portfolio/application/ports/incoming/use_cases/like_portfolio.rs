use async_trait::async_trait;
use uuid::Uuid;

use super::PortfolioError;

#[async_trait]
pub trait LikePortfolioUseCase: Send + Sync {
    /// Returns the new like count.
    async fn execute(&self, portfolio_id: Uuid) -> Result<i32, PortfolioError>;
}
