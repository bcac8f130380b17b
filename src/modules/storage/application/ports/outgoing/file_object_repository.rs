use async_trait::async_trait;
use uuid::Uuid;

use crate::shared::api::PageParams;
use crate::storage::application::domain::{FileObject, NewFileObject};

#[derive(Debug, Clone)]
pub struct FileListQuery {
    pub uploaded_by: Option<Uuid>,
    /// Prefix match, e.g. `image/`.
    pub content_type: Option<String>,
    pub is_public: Option<bool>,
    pub page: PageParams,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileObjectRepositoryError {
    #[error("File not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupt file row: {0}")]
    CorruptRow(String),
}

/// Soft-deleted rows are invisible to every read.
#[async_trait]
pub trait FileObjectRepository: Send + Sync {
    async fn insert(&self, file: NewFileObject) -> Result<FileObject, FileObjectRepositoryError>;

    async fn find_live(&self, id: Uuid) -> Result<Option<FileObject>, FileObjectRepositoryError>;

    async fn soft_delete(&self, id: Uuid) -> Result<(), FileObjectRepositoryError>;

    /// Live and soft-deleted rows alike.
    async fn count_by_config(&self, config_id: i32) -> Result<u64, FileObjectRepositoryError>;

    /// Newest first.
    async fn list(
        &self,
        query: &FileListQuery,
    ) -> Result<(Vec<FileObject>, u64), FileObjectRepositoryError>;
}
