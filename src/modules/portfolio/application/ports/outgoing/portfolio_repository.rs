use async_trait::async_trait;
use uuid::Uuid;

use crate::portfolio::application::domain::{PortfolioRecord, PortfolioStatus, VersionRecord};

#[derive(Debug, Clone)]
pub struct NewPortfolio {
    pub owner_id: Uuid,
    pub title: String,
    pub author: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image_object_id: Option<Uuid>,
    pub ai_level: String,
    pub status: PortfolioStatus,
}

/// Version row with its label already decided (initial versions).
#[derive(Debug, Clone)]
pub struct NewVersion {
    pub label: String,
    pub title: String,
    pub description: String,
    pub html_content: String,
    pub thumbnail: String,
    pub change_log: String,
    pub is_active: bool,
}

/// Version appended to an existing portfolio; the repository assigns the label.
#[derive(Debug, Clone)]
pub struct VersionDraft {
    pub title: String,
    pub description: String,
    pub html_content: String,
    pub thumbnail: String,
    pub change_log: String,
    pub is_active: bool,
}

/// `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct PortfolioChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_object_id: Option<Uuid>,
    pub ai_level: Option<String>,
    pub status: Option<PortfolioStatus>,
}

/// `None` keeps the stored value. A new `html_content` must come with its `thumbnail`.
#[derive(Debug, Clone, Default)]
pub struct VersionChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub html_content: Option<String>,
    pub thumbnail: Option<String>,
    pub change_log: Option<String>,
    /// Make this the only active version of its portfolio.
    pub activate: bool,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PortfolioRepositoryError {
    #[error("Portfolio not found")]
    NotFound,

    #[error("Version not found")]
    VersionNotFound,

    #[error("Version is active")]
    VersionActive,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    /// Portfolio plus its initial versions, atomically.
    async fn create(
        &self,
        portfolio: NewPortfolio,
        versions: Vec<NewVersion>,
    ) -> Result<(PortfolioRecord, Vec<VersionRecord>), PortfolioRepositoryError>;

    async fn update(
        &self,
        portfolio_id: Uuid,
        changes: PortfolioChanges,
    ) -> Result<PortfolioRecord, PortfolioRepositoryError>;

    /// Removes the row; versions go with it.
    async fn hard_delete(&self, portfolio_id: Uuid) -> Result<(), PortfolioRepositoryError>;

    async fn increment_views(&self, portfolio_id: Uuid) -> Result<(), PortfolioRepositoryError>;

    /// Published portfolios only. Returns the new like count.
    async fn like(&self, portfolio_id: Uuid) -> Result<i32, PortfolioRepositoryError>;

    /// Marks every portfolio of `owner_id` as deleted. Returns the number touched.
    async fn archive_by_owner(&self, owner_id: Uuid) -> Result<u64, PortfolioRepositoryError>;

    /// Derives the next label and inserts while holding a lock on the parent portfolio.
    async fn append_version(
        &self,
        portfolio_id: Uuid,
        draft: VersionDraft,
    ) -> Result<VersionRecord, PortfolioRepositoryError>;

    async fn update_version(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
        changes: VersionChanges,
    ) -> Result<VersionRecord, PortfolioRepositoryError>;

    /// Deactivates every version of the portfolio, then activates `version_id`.
    async fn activate_version(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<(), PortfolioRepositoryError>;

    /// Fails with `VersionActive` for the active version.
    async fn delete_version(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<(), PortfolioRepositoryError>;
}
