use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use super::{load_visible, load_writable, provided};
use crate::portfolio::application::domain::{Actor, VersionRecord};
use crate::portfolio::application::ports::incoming::use_cases::{
    CreateVersionInput, CreateVersionUseCase, DeleteVersionUseCase, GetVersionUseCase,
    ListVersionsUseCase, PortfolioError, SetActiveVersionUseCase, UpdateVersionInput,
    UpdateVersionUseCase,
};
use crate::portfolio::application::ports::outgoing::{
    PortfolioQuery, PortfolioRepository, VersionChanges, VersionDraft,
};
use crate::thumbnail::thumbnail_for;

// ──── Create ────

pub struct CreateVersionService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> CreateVersionService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> CreateVersionUseCase for CreateVersionService<Q, R>
where
    Q: PortfolioQuery + Send + Sync,
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        portfolio_id: Uuid,
        input: CreateVersionInput,
    ) -> Result<VersionRecord, PortfolioError> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(PortfolioError::Validation("Version title is required".to_string()));
        }

        load_writable(&self.query, portfolio_id, &actor).await?;

        let is_first = self.query.list_versions(portfolio_id).await?.is_empty();

        let draft = VersionDraft {
            title,
            description: input.description,
            thumbnail: thumbnail_for(&input.html_content),
            html_content: input.html_content,
            change_log: input.change_log,
            is_active: input.is_active || is_first,
        };

        let version = self.repository.append_version(portfolio_id, draft).await?;

        info!(
            portfolio_id = %portfolio_id,
            version_id = %version.id,
            label = %version.label,
            active = version.is_active,
            "Version created"
        );

        Ok(version)
    }
}

// ──── Reads ────

pub struct ListVersionsService<Q>
where
    Q: PortfolioQuery,
{
    query: Q,
}

impl<Q> ListVersionsService<Q>
where
    Q: PortfolioQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListVersionsUseCase for ListVersionsService<Q>
where
    Q: PortfolioQuery + Send + Sync,
{
    async fn execute(
        &self,
        portfolio_id: Uuid,
        viewer: Option<Actor>,
    ) -> Result<Vec<VersionRecord>, PortfolioError> {
        load_visible(&self.query, portfolio_id, viewer.as_ref()).await?;
        Ok(self.query.list_versions(portfolio_id).await?)
    }
}

pub struct GetVersionService<Q>
where
    Q: PortfolioQuery,
{
    query: Q,
}

impl<Q> GetVersionService<Q>
where
    Q: PortfolioQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetVersionUseCase for GetVersionService<Q>
where
    Q: PortfolioQuery + Send + Sync,
{
    async fn execute(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
        viewer: Option<Actor>,
    ) -> Result<VersionRecord, PortfolioError> {
        load_visible(&self.query, portfolio_id, viewer.as_ref()).await?;
        self.query
            .find_version(portfolio_id, version_id)
            .await?
            .ok_or(PortfolioError::VersionNotFound)
    }
}

// ──── Update ────

pub struct UpdateVersionService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> UpdateVersionService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> UpdateVersionUseCase for UpdateVersionService<Q, R>
where
    Q: PortfolioQuery + Send + Sync,
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        portfolio_id: Uuid,
        version_id: Uuid,
        input: UpdateVersionInput,
    ) -> Result<VersionRecord, PortfolioError> {
        load_writable(&self.query, portfolio_id, &actor).await?;

        let html_content = provided(input.html_content);
        let changes = VersionChanges {
            title: provided(input.title).map(|t| t.trim().to_string()),
            description: provided(input.description),
            thumbnail: html_content.as_deref().map(thumbnail_for),
            html_content,
            change_log: provided(input.change_log),
            activate: input.is_active == Some(true),
        };

        let version = self
            .repository
            .update_version(portfolio_id, version_id, changes)
            .await?;

        info!(portfolio_id = %portfolio_id, version_id = %version_id, "Version updated");
        Ok(version)
    }
}

// ──── Activate / delete ────

pub struct SetActiveVersionService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> SetActiveVersionService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> SetActiveVersionUseCase for SetActiveVersionService<Q, R>
where
    Q: PortfolioQuery + Send + Sync,
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<(), PortfolioError> {
        load_writable(&self.query, portfolio_id, &actor).await?;
        self.repository
            .activate_version(portfolio_id, version_id)
            .await?;

        info!(portfolio_id = %portfolio_id, version_id = %version_id, "Active version changed");
        Ok(())
    }
}

pub struct DeleteVersionService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> DeleteVersionService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> DeleteVersionUseCase for DeleteVersionService<Q, R>
where
    Q: PortfolioQuery + Send + Sync,
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<(), PortfolioError> {
        load_writable(&self.query, portfolio_id, &actor).await?;
        self.repository
            .delete_version(portfolio_id, version_id)
            .await?;

        info!(portfolio_id = %portfolio_id, version_id = %version_id, "Version deleted");
        Ok(())
    }
}
