use async_trait::async_trait;
use uuid::Uuid;

use super::{PortfolioError, PortfolioView};
use crate::portfolio::application::domain::Actor;

/// Detail read. Each read of a published portfolio counts as a view.
#[async_trait]
pub trait GetPortfolioUseCase: Send + Sync {
    async fn execute(
        &self,
        portfolio_id: Uuid,
        viewer: Option<Actor>,
    ) -> Result<PortfolioView, PortfolioError>;
}
