mod config_services;
mod file_services;
mod storage_gateway;

pub use config_services::{
    ActivateStorageConfigService, CreateStorageConfigService, DeleteStorageConfigService,
    GetStorageConfigService, ListStorageConfigsService, TestConnectionService,
    TestStoredConfigService, UpdateStorageConfigService,
};
pub use file_services::{
    DeleteFileService, GetFileUrlService, ListFilesService, UploadFileService,
};
pub use storage_gateway::{
    ActiveStorage, GatewayError, StorageGateway, CONNECT_TIMEOUT, DELETE_TIMEOUT,
    PRESIGN_TIMEOUT, UPLOAD_TIMEOUT,
};
