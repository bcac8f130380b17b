pub mod configs;
pub mod files;
pub mod storage_dto;

pub use configs::{
    activate_storage_config_handler, create_storage_config_handler, delete_storage_config_handler,
    get_storage_config_handler, list_storage_configs_handler, test_connection_handler,
    test_stored_config_handler, update_storage_config_handler,
};
pub use files::{delete_file_handler, get_file_url_handler, list_files_handler, upload_file_handler};
