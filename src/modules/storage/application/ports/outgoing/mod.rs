pub mod file_object_repository;
pub mod object_store;
pub mod storage_config_repository;

pub use file_object_repository::{FileListQuery, FileObjectRepository, FileObjectRepositoryError};
pub use object_store::{ObjectStoreClient, ObjectStoreConnector, ObjectStoreError, PutObject};
pub use storage_config_repository::{
    ActivationHook, StorageConfigRepository, StorageConfigRepositoryError,
};
