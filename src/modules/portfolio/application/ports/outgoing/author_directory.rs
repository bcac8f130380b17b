use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthorDirectoryError {
    #[error("Author lookup failed: {0}")]
    LookupFailed(String),
}

/// Resolves the name stored as a portfolio's `author`.
#[async_trait]
pub trait AuthorDirectory: Send + Sync {
    async fn display_name(&self, user_id: Uuid) -> Result<Option<String>, AuthorDirectoryError>;
}
