use std::sync::Arc;

use crate::storage::application::ports::incoming::use_cases::{
    ActivateStorageConfigUseCase, CreateStorageConfigUseCase, DeleteFileUseCase,
    DeleteStorageConfigUseCase, GetFileUrlUseCase, GetStorageConfigUseCase, ListFilesUseCase,
    ListStorageConfigsUseCase, TestConnectionUseCase, TestStoredConfigUseCase,
    UpdateStorageConfigUseCase, UploadFileUseCase,
};

#[derive(Clone)]
pub struct StorageUseCases {
    pub create_config: Arc<dyn CreateStorageConfigUseCase + Send + Sync>,
    pub list_configs: Arc<dyn ListStorageConfigsUseCase + Send + Sync>,
    pub get_config: Arc<dyn GetStorageConfigUseCase + Send + Sync>,
    pub update_config: Arc<dyn UpdateStorageConfigUseCase + Send + Sync>,
    pub delete_config: Arc<dyn DeleteStorageConfigUseCase + Send + Sync>,
    pub activate_config: Arc<dyn ActivateStorageConfigUseCase + Send + Sync>,
    pub test_connection: Arc<dyn TestConnectionUseCase + Send + Sync>,
    pub test_stored_config: Arc<dyn TestStoredConfigUseCase + Send + Sync>,
    pub upload_file: Arc<dyn UploadFileUseCase + Send + Sync>,
    pub file_url: Arc<dyn GetFileUrlUseCase + Send + Sync>,
    pub delete_file: Arc<dyn DeleteFileUseCase + Send + Sync>,
    pub list_files: Arc<dyn ListFilesUseCase + Send + Sync>,
}
