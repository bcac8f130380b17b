mod json_config;
mod pagination;
mod response;

pub use json_config::{custom_json_config, custom_query_config};
pub use pagination::{PageParams, SortOrder};
pub use response::ApiResponse;
