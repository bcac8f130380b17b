pub mod file_objects;
pub mod storage_configs;
