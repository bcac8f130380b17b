use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::create_portfolio_service::validate_category;
use super::{load_writable, provided, with_image_url};
use crate::portfolio::application::domain::{Actor, PortfolioStatus};
use crate::portfolio::application::ports::incoming::use_cases::{
    PortfolioError, PortfolioView, UpdatePortfolioInput, UpdatePortfolioUseCase,
};
use crate::portfolio::application::ports::outgoing::{
    AuthorDirectory, ImageUrlResolver, PortfolioChanges, PortfolioQuery, PortfolioRepository,
};

pub struct UpdatePortfolioService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    query: Q,
    repository: R,
    authors: Arc<dyn AuthorDirectory>,
    images: Arc<dyn ImageUrlResolver>,
}

impl<Q, R> UpdatePortfolioService<Q, R>
where
    Q: PortfolioQuery,
    R: PortfolioRepository,
{
    pub fn new(
        query: Q,
        repository: R,
        authors: Arc<dyn AuthorDirectory>,
        images: Arc<dyn ImageUrlResolver>,
    ) -> Self {
        Self {
            query,
            repository,
            authors,
            images,
        }
    }
}

/// Admins may set any status; everyone else may only send a portfolio back to draft.
fn permitted_status(actor: &Actor, requested: Option<PortfolioStatus>) -> Option<PortfolioStatus> {
    match requested {
        Some(status) if actor.is_admin => Some(status),
        Some(PortfolioStatus::Draft) => Some(PortfolioStatus::Draft),
        _ => None,
    }
}

#[async_trait]
impl<Q, R> UpdatePortfolioUseCase for UpdatePortfolioService<Q, R>
where
    Q: PortfolioQuery + Send + Sync,
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        portfolio_id: Uuid,
        input: UpdatePortfolioInput,
    ) -> Result<PortfolioView, PortfolioError> {
        let existing = load_writable(&self.query, portfolio_id, &actor).await?;

        let category = provided(input.category).map(|c| c.trim().to_string());
        if let Some(category) = &category {
            validate_category(category)?;
        }

        // Author is a snapshot of the owner's name at write time.
        let author = self.authors.display_name(existing.owner_id).await?;

        let changes = PortfolioChanges {
            title: provided(input.title).map(|t| t.trim().to_string()),
            author,
            description: provided(input.description),
            content: provided(input.content),
            category,
            tags: input.tags.filter(|t| !t.is_empty()),
            image_object_id: input.image_object_id,
            ai_level: provided(input.ai_level),
            status: permitted_status(&actor, input.status),
        };

        let updated = self.repository.update(portfolio_id, changes).await?;

        info!(
            portfolio_id = %portfolio_id,
            actor_id = %actor.user_id,
            status = %updated.status,
            "Portfolio updated"
        );

        Ok(with_image_url(self.images.as_ref(), PortfolioView::bare(updated)).await)
    }
}
