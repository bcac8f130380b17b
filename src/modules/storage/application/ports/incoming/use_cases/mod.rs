mod configs;
mod error;
mod files;

pub use configs::{
    ActivateStorageConfigUseCase, CreateStorageConfigUseCase, DeleteStorageConfigUseCase,
    GetStorageConfigUseCase, ListStorageConfigsUseCase, TestConnectionUseCase,
    TestStoredConfigUseCase, UpdateStorageConfigUseCase,
};
pub use error::StorageError;
pub use files::{
    DeleteFileUseCase, FileListRequest, FilePage, FileView, GetFileUrlUseCase, ListFilesUseCase,
    UploadFileInput, UploadFileUseCase, DEFAULT_FILE_PAGE_SIZE, MAX_FILE_PAGE_SIZE,
};
