use async_trait::async_trait;
use uuid::Uuid;

use super::{PortfolioError, PortfolioView};
use crate::portfolio::application::domain::{Actor, PortfolioStatus};

/// Empty strings and empty tag lists leave the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePortfolioInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_object_id: Option<Uuid>,
    pub ai_level: Option<String>,
    /// Non-admins may only move a portfolio back to `draft`; other values are ignored.
    pub status: Option<PortfolioStatus>,
}

#[async_trait]
pub trait UpdatePortfolioUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        portfolio_id: Uuid,
        input: UpdatePortfolioInput,
    ) -> Result<PortfolioView, PortfolioError>;
}
