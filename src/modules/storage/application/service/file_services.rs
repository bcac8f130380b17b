use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use super::storage_gateway::StorageGateway;
use crate::shared::api::PageParams;
use crate::storage::application::domain::{storage_key, FileObject, NewFileObject};
use crate::storage::application::ports::incoming::use_cases::{
    DeleteFileUseCase, FileListRequest, FilePage, FileView, GetFileUrlUseCase, ListFilesUseCase,
    StorageError, UploadFileInput, UploadFileUseCase, DEFAULT_FILE_PAGE_SIZE, MAX_FILE_PAGE_SIZE,
};
use crate::storage::application::ports::outgoing::{FileListQuery, FileObjectRepository};

// ──── Upload ────

pub struct UploadFileService<F>
where
    F: FileObjectRepository,
{
    files: F,
    gateway: Arc<StorageGateway>,
}

impl<F> UploadFileService<F>
where
    F: FileObjectRepository,
{
    pub fn new(files: F, gateway: Arc<StorageGateway>) -> Self {
        Self { files, gateway }
    }
}

fn object_metadata(input: &UploadFileInput) -> HashMap<String, String> {
    let mut metadata: HashMap<String, String> = input
        .tags
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    metadata.insert("uploaded-by".to_string(), input.uploaded_by.to_string());
    metadata.insert("original-name".to_string(), input.original_name.clone());
    metadata
}

#[async_trait]
impl<F> UploadFileUseCase for UploadFileService<F>
where
    F: FileObjectRepository + Send + Sync,
{
    async fn execute(&self, input: UploadFileInput) -> Result<FileObject, StorageError> {
        let storage = self.gateway.current().await?;
        if input.bytes.is_empty() {
            return Err(StorageError::Validation("File is empty".to_string()));
        }

        let id = Uuid::new_v4();
        let key = storage_key(id, &input.original_name);
        let md5_hash = format!("{:x}", md5::compute(&input.bytes));
        let file_size = input.bytes.len() as i64;
        let metadata = object_metadata(&input);

        storage
            .upload(&key, input.bytes, &input.content_type, metadata)
            .await?;

        let record = NewFileObject {
            id,
            original_name: input.original_name,
            storage_path: key.clone(),
            content_type: input.content_type,
            file_size,
            md5_hash,
            config_id: storage.config.id,
            is_public: input.is_public,
            tags: input.tags,
            uploaded_by: input.uploaded_by,
        };

        match self.files.insert(record).await {
            Ok(file) => {
                info!(file_id = %file.id, original_name = %file.original_name, size = file.file_size, "File uploaded");
                Ok(file)
            }
            Err(e) => {
                if let Err(cleanup) = storage.remove(&key).await {
                    warn!(key = %key, error = %cleanup, "Failed to remove orphaned object");
                }
                Err(e.into())
            }
        }
    }
}

// ──── URL ────

pub struct GetFileUrlService<F>
where
    F: FileObjectRepository,
{
    files: F,
    gateway: Arc<StorageGateway>,
}

impl<F> GetFileUrlService<F>
where
    F: FileObjectRepository,
{
    pub fn new(files: F, gateway: Arc<StorageGateway>) -> Self {
        Self { files, gateway }
    }
}

#[async_trait]
impl<F> GetFileUrlUseCase for GetFileUrlService<F>
where
    F: FileObjectRepository + Send + Sync,
{
    async fn execute(&self, file_id: Uuid) -> Result<String, StorageError> {
        let storage = self.gateway.current().await?;
        let file = self
            .files
            .find_live(file_id)
            .await?
            .ok_or(StorageError::FileNotFound)?;

        Ok(storage.url_for(&file).await?)
    }
}

// ──── Delete ────

pub struct DeleteFileService<F>
where
    F: FileObjectRepository,
{
    files: F,
    gateway: Arc<StorageGateway>,
}

impl<F> DeleteFileService<F>
where
    F: FileObjectRepository,
{
    pub fn new(files: F, gateway: Arc<StorageGateway>) -> Self {
        Self { files, gateway }
    }
}

#[async_trait]
impl<F> DeleteFileUseCase for DeleteFileService<F>
where
    F: FileObjectRepository + Send + Sync,
{
    async fn execute(
        &self,
        requester: Uuid,
        is_admin: bool,
        file_id: Uuid,
    ) -> Result<(), StorageError> {
        let storage = self.gateway.current().await?;
        let file = self
            .files
            .find_live(file_id)
            .await?
            .ok_or(StorageError::FileNotFound)?;

        if !is_admin && file.uploaded_by != requester {
            return Err(StorageError::Forbidden);
        }

        if let Err(e) = storage.remove(&file.storage_path).await {
            warn!(file_id = %file_id, key = %file.storage_path, error = %e, "Remote delete failed; soft-deleting record anyway");
        }

        self.files.soft_delete(file_id).await?;
        info!(file_id = %file_id, "File deleted");
        Ok(())
    }
}

// ──── List ────

pub struct ListFilesService<F>
where
    F: FileObjectRepository,
{
    files: F,
    gateway: Arc<StorageGateway>,
}

impl<F> ListFilesService<F>
where
    F: FileObjectRepository,
{
    pub fn new(files: F, gateway: Arc<StorageGateway>) -> Self {
        Self { files, gateway }
    }
}

#[async_trait]
impl<F> ListFilesUseCase for ListFilesService<F>
where
    F: FileObjectRepository + Send + Sync,
{
    async fn execute(&self, request: FileListRequest) -> Result<FilePage, StorageError> {
        let page = PageParams::resolve(
            request.page,
            request.page_size,
            DEFAULT_FILE_PAGE_SIZE,
            MAX_FILE_PAGE_SIZE,
        );
        let query = FileListQuery {
            uploaded_by: request.uploaded_by,
            content_type: request.content_type.filter(|c| !c.trim().is_empty()),
            is_public: request.is_public,
            page,
        };

        let (files, total) = self.files.list(&query).await?;
        let storage = self.gateway.current().await.ok();

        let mut items = Vec::with_capacity(files.len());
        for file in files {
            let url = match &storage {
                Some(storage) => storage.url_for(&file).await.ok(),
                None => None,
            };
            items.push(FileView { file, url });
        }

        Ok(FilePage {
            items,
            total,
            page: page.page,
            page_size: page.page_size,
        })
    }
}
