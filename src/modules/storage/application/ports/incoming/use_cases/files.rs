use async_trait::async_trait;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::StorageError;
use crate::storage::application::domain::FileObject;

pub const DEFAULT_FILE_PAGE_SIZE: u64 = 20;
pub const MAX_FILE_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone)]
pub struct UploadFileInput {
    pub bytes: Vec<u8>,
    pub original_name: String,
    pub content_type: String,
    pub uploaded_by: Uuid,
    pub is_public: bool,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct FileListRequest {
    pub uploaded_by: Option<Uuid>,
    pub content_type: Option<String>,
    pub is_public: Option<bool>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// A file with its URL; `None` when the URL could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FileView {
    pub file: FileObject,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FilePage {
    pub items: Vec<FileView>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[async_trait]
pub trait UploadFileUseCase: Send + Sync {
    async fn execute(&self, input: UploadFileInput) -> Result<FileObject, StorageError>;
}

/// Direct URL for public files on a public bucket, presigned otherwise. Never cached.
#[async_trait]
pub trait GetFileUrlUseCase: Send + Sync {
    async fn execute(&self, file_id: Uuid) -> Result<String, StorageError>;
}

/// Uploader or admin only. The remote delete is best-effort; the row is always soft-deleted.
#[async_trait]
pub trait DeleteFileUseCase: Send + Sync {
    async fn execute(
        &self,
        requester: Uuid,
        is_admin: bool,
        file_id: Uuid,
    ) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ListFilesUseCase: Send + Sync {
    async fn execute(&self, request: FileListRequest) -> Result<FilePage, StorageError>;
}
