use async_trait::async_trait;
use uuid::Uuid;

use super::PortfolioError;
use crate::portfolio::application::domain::{Actor, VersionRecord};

#[derive(Debug, Clone, Default)]
pub struct CreateVersionInput {
    pub title: String,
    pub description: String,
    pub html_content: String,
    pub change_log: String,
    /// Inactive unless requested; the first version of a portfolio is always active.
    pub is_active: bool,
}

/// Empty strings leave the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateVersionInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub html_content: Option<String>,
    pub change_log: Option<String>,
    /// `Some(true)` makes this the only active version; `Some(false)` is ignored.
    pub is_active: Option<bool>,
}

#[async_trait]
pub trait CreateVersionUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        portfolio_id: Uuid,
        input: CreateVersionInput,
    ) -> Result<VersionRecord, PortfolioError>;
}

#[async_trait]
pub trait ListVersionsUseCase: Send + Sync {
    async fn execute(
        &self,
        portfolio_id: Uuid,
        viewer: Option<Actor>,
    ) -> Result<Vec<VersionRecord>, PortfolioError>;
}

#[async_trait]
pub trait GetVersionUseCase: Send + Sync {
    async fn execute(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
        viewer: Option<Actor>,
    ) -> Result<VersionRecord, PortfolioError>;
}

#[async_trait]
pub trait UpdateVersionUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        portfolio_id: Uuid,
        version_id: Uuid,
        input: UpdateVersionInput,
    ) -> Result<VersionRecord, PortfolioError>;
}

#[async_trait]
pub trait SetActiveVersionUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<(), PortfolioError>;
}

#[async_trait]
pub trait DeleteVersionUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<(), PortfolioError>;
}
