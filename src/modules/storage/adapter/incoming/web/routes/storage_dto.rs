use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::api::ApiResponse;
use crate::storage::application::domain::{
    ConnectionSettings, FileObject, StorageConfig, StorageConfigDraft, DEFAULT_REGION,
    DEFAULT_URL_EXPIRY_SECS,
};
use crate::storage::application::ports::incoming::use_cases::{FileView, StorageError};

#[derive(Debug, Deserialize, ToSchema)]
pub struct StorageConfigRequest {
    #[schema(example = "primary-minio")]
    pub name: String,
    /// host[:port], no scheme
    #[schema(example = "minio.internal:9000")]
    pub endpoint: String,
    pub access_key: String,
    /// Empty or `******` keeps the stored secret on update
    #[serde(default)]
    pub secret_key: String,
    #[schema(example = "design-assets")]
    pub bucket_name: String,
    #[serde(default)]
    pub use_ssl: bool,
    #[serde(default)]
    pub is_private: bool,
    /// Defaults to us-east-1
    pub region: Option<String>,
    /// Presigned URL lifetime in seconds, default 3600
    pub url_expiry: Option<i32>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub description: String,
}

fn region_or_default(region: Option<String>) -> String {
    region
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

impl From<StorageConfigRequest> for StorageConfigDraft {
    fn from(req: StorageConfigRequest) -> Self {
        Self {
            name: req.name.trim().to_string(),
            endpoint: req.endpoint.trim().to_string(),
            access_key: req.access_key,
            secret_key: req.secret_key,
            bucket_name: req.bucket_name.trim().to_string(),
            use_ssl: req.use_ssl,
            is_private: req.is_private,
            region: region_or_default(req.region),
            url_expiry: req.url_expiry.unwrap_or(DEFAULT_URL_EXPIRY_SECS),
            is_active: req.is_active,
            description: req.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConnectionTestRequest {
    #[schema(example = "minio.internal:9000")]
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
    #[serde(default)]
    pub use_ssl: bool,
    pub region: Option<String>,
}

impl From<ConnectionTestRequest> for ConnectionSettings {
    fn from(req: ConnectionTestRequest) -> Self {
        Self {
            endpoint: req.endpoint.trim().to_string(),
            access_key: req.access_key,
            secret_key: req.secret_key,
            bucket_name: req.bucket_name.trim().to_string(),
            use_ssl: req.use_ssl,
            region: region_or_default(req.region),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StorageConfigResponse {
    pub id: i32,
    pub name: String,
    pub endpoint: String,
    pub access_key: String,
    /// Always `******`
    pub secret_key: String,
    pub bucket_name: String,
    pub use_ssl: bool,
    pub is_private: bool,
    pub region: String,
    pub url_expiry: i32,
    pub is_active: bool,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<StorageConfig> for StorageConfigResponse {
    fn from(c: StorageConfig) -> Self {
        let c = c.masked();
        Self {
            id: c.id,
            name: c.name,
            endpoint: c.endpoint,
            access_key: c.access_key,
            secret_key: c.secret_key,
            bucket_name: c.bucket_name,
            use_ssl: c.use_ssl,
            is_private: c.is_private,
            region: c.region,
            url_expiry: c.url_expiry,
            is_active: c.is_active,
            description: c.description,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FileResponse {
    pub id: Uuid,
    pub original_name: String,
    pub storage_path: String,
    pub content_type: String,
    pub file_size: i64,
    pub md5_hash: String,
    pub config_id: i32,
    pub is_public: bool,
    pub tags: BTreeMap<String, String>,
    pub uploaded_by: Uuid,
    /// Present in listings when a URL could be produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub created_at: String,
}

impl From<FileObject> for FileResponse {
    fn from(f: FileObject) -> Self {
        Self {
            id: f.id,
            original_name: f.original_name,
            storage_path: f.storage_path,
            content_type: f.content_type,
            file_size: f.file_size,
            md5_hash: f.md5_hash,
            config_id: f.config_id,
            is_public: f.is_public,
            tags: f.tags,
            uploaded_by: f.uploaded_by,
            url: None,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

impl From<FileView> for FileResponse {
    fn from(view: FileView) -> Self {
        let mut response = FileResponse::from(view.file);
        response.url = view.url;
        response
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FileUrlResponse {
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Maps a storage failure onto the API envelope. `action` names the request in the logs.
pub fn storage_error_response(action: &str, e: StorageError) -> HttpResponse {
    match e {
        StorageError::ConfigNotFound => {
            ApiResponse::not_found("CONFIG_NOT_FOUND", "Storage config not found")
        }
        StorageError::FileNotFound => ApiResponse::not_found("FILE_NOT_FOUND", "File not found"),
        StorageError::NameTaken => ApiResponse::conflict(
            "CONFIG_NAME_TAKEN",
            "A storage config with this name already exists",
        ),
        StorageError::Forbidden => {
            ApiResponse::forbidden("FORBIDDEN", "You are not allowed to modify this file")
        }
        StorageError::Validation(msg) => ApiResponse::bad_request("VALIDATION_ERROR", &msg),
        StorageError::ConnectionFailed(msg) => {
            warn!(action, error = %msg, "Storage connection failed");
            ApiResponse::bad_request("CONNECTION_FAILED", &format!("Connection failed: {}", msg))
        }
        StorageError::InvalidOperation(msg) => ApiResponse::invalid_operation(&msg),
        StorageError::NotInitialized => {
            warn!(action, "Storage request without an active config");
            ApiResponse::storage_not_initialized()
        }
        StorageError::Internal(msg) => {
            error!(action, error = %msg, "Storage request failed");
            ApiResponse::internal_error()
        }
    }
}
