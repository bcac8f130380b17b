use async_trait::async_trait;
use uuid::Uuid;

use super::{PortfolioError, PortfolioView};

#[derive(Debug, Clone, Default)]
pub struct InitialVersionInput {
    /// Explicit label such as `v1.0`; derived from the position when absent.
    pub label: Option<String>,
    pub title: String,
    pub description: String,
    pub html_content: String,
    pub change_log: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CreatePortfolioInput {
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image_object_id: Option<Uuid>,
    pub ai_level: String,
    pub versions: Vec<InitialVersionInput>,
}

#[async_trait]
pub trait CreatePortfolioUseCase: Send + Sync {
    async fn execute(
        &self,
        owner_id: Uuid,
        input: CreatePortfolioInput,
    ) -> Result<PortfolioView, PortfolioError>;
}
