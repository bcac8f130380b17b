pub mod file_object_repository_postgres;
pub mod s3_object_store;
pub mod sea_orm_entity;
pub mod storage_config_repository_postgres;

pub use file_object_repository_postgres::FileObjectRepositoryPostgres;
pub use s3_object_store::S3Connector;
pub use storage_config_repository_postgres::StorageConfigRepositoryPostgres;
