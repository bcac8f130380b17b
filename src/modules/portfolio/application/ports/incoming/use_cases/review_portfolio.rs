use async_trait::async_trait;
use uuid::Uuid;

use super::{PortfolioError, PortfolioView};
use crate::portfolio::application::domain::PortfolioStatus;

/// Admin verdict on a portfolio: `published` or `rejected`.
#[async_trait]
pub trait ReviewPortfolioUseCase: Send + Sync {
    async fn execute(
        &self,
        portfolio_id: Uuid,
        status: PortfolioStatus,
    ) -> Result<PortfolioView, PortfolioError>;
}
