use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::with_image_url;
use crate::moderation::application::domain::{initial_outcome, ModeratedEntity, ModerationOutcome};
use crate::moderation::application::ports::outgoing::AdminSettingsRepository;
use crate::portfolio::application::domain::versioning::{
    initial_label, normalise_active, MAX_LABEL_LEN,
};
use crate::portfolio::application::domain::{PortfolioStatus, CATEGORIES, CATEGORY_WILDCARD};
use crate::portfolio::application::ports::incoming::use_cases::{
    CreatePortfolioInput, CreatePortfolioUseCase, InitialVersionInput, PortfolioError,
    PortfolioView,
};
use crate::portfolio::application::ports::outgoing::{
    AuthorDirectory, ImageUrlResolver, NewPortfolio, NewVersion, PortfolioRepository,
};
use crate::thumbnail::thumbnail_for;

pub struct CreatePortfolioService<R>
where
    R: PortfolioRepository,
{
    repository: R,
    authors: Arc<dyn AuthorDirectory>,
    settings: Arc<dyn AdminSettingsRepository>,
    images: Arc<dyn ImageUrlResolver>,
}

impl<R> CreatePortfolioService<R>
where
    R: PortfolioRepository,
{
    pub fn new(
        repository: R,
        authors: Arc<dyn AuthorDirectory>,
        settings: Arc<dyn AdminSettingsRepository>,
        images: Arc<dyn ImageUrlResolver>,
    ) -> Self {
        Self {
            repository,
            authors,
            settings,
            images,
        }
    }
}

pub(crate) fn validate_category(category: &str) -> Result<(), PortfolioError> {
    let known = CATEGORIES
        .iter()
        .any(|(value, _)| *value == category && *value != CATEGORY_WILDCARD);
    if known {
        Ok(())
    } else {
        Err(PortfolioError::Validation(format!(
            "Unknown category: {}",
            category
        )))
    }
}

fn validate(input: &CreatePortfolioInput) -> Result<(), PortfolioError> {
    if input.title.trim().is_empty() {
        return Err(PortfolioError::Validation("Title is required".to_string()));
    }
    if input.ai_level.trim().is_empty() {
        return Err(PortfolioError::Validation("AI level is required".to_string()));
    }
    validate_category(input.category.trim())?;
    if input.versions.iter().any(|v| v.title.trim().is_empty()) {
        return Err(PortfolioError::Validation(
            "Every version needs a title".to_string(),
        ));
    }
    Ok(())
}

/// Resolved labels for the initial versions; each fits the column and none repeats.
fn initial_labels(versions: &[InitialVersionInput]) -> Result<Vec<String>, PortfolioError> {
    let mut labels: Vec<String> = Vec::with_capacity(versions.len());
    for (i, v) in versions.iter().enumerate() {
        let label = initial_label(v.label.as_deref(), i);
        if label.chars().count() > MAX_LABEL_LEN {
            return Err(PortfolioError::Validation(format!(
                "Version label must be at most {} characters",
                MAX_LABEL_LEN
            )));
        }
        if labels.contains(&label) {
            return Err(PortfolioError::Validation(format!(
                "Duplicate version label: {}",
                label
            )));
        }
        labels.push(label);
    }
    Ok(labels)
}

#[async_trait]
impl<R> CreatePortfolioUseCase for CreatePortfolioService<R>
where
    R: PortfolioRepository + Send + Sync,
{
    async fn execute(
        &self,
        owner_id: Uuid,
        input: CreatePortfolioInput,
    ) -> Result<PortfolioView, PortfolioError> {
        validate(&input)?;
        let labels = initial_labels(&input.versions)?;

        let author = self
            .authors
            .display_name(owner_id)
            .await?
            .ok_or(PortfolioError::Forbidden)?;

        let settings = self
            .settings
            .get_or_create()
            .await
            .map_err(|e| PortfolioError::Internal(e.to_string()))?;
        let status = match initial_outcome(&settings, ModeratedEntity::Portfolio) {
            ModerationOutcome::AutoApproved => PortfolioStatus::Published,
            ModerationOutcome::AwaitingReview => PortfolioStatus::Draft,
        };

        let mut active: Vec<bool> = input.versions.iter().map(|v| v.is_active).collect();
        normalise_active(&mut active);

        let versions: Vec<NewVersion> = input
            .versions
            .into_iter()
            .zip(active)
            .zip(labels)
            .map(|((v, is_active), label)| NewVersion {
                label,
                title: v.title.trim().to_string(),
                description: v.description,
                thumbnail: thumbnail_for(&v.html_content),
                html_content: v.html_content,
                change_log: v.change_log,
                is_active,
            })
            .collect();

        let portfolio = NewPortfolio {
            owner_id,
            title: input.title.trim().to_string(),
            author,
            description: input.description,
            content: input.content,
            category: input.category.trim().to_string(),
            tags: input.tags,
            image_object_id: input.image_object_id,
            ai_level: input.ai_level.trim().to_string(),
            status,
        };

        let (portfolio, versions) = self.repository.create(portfolio, versions).await?;

        info!(
            portfolio_id = %portfolio.id,
            owner_id = %owner_id,
            status = %portfolio.status,
            versions = versions.len(),
            "Portfolio created"
        );

        let view = PortfolioView {
            active_version: versions.iter().find(|v| v.is_active).cloned(),
            versions,
            ..PortfolioView::bare(portfolio)
        };

        Ok(with_image_url(self.images.as_ref(), view).await)
    }
}
