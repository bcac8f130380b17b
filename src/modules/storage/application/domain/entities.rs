use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use uuid::Uuid;

/// Placeholder returned wherever a secret key would be shown.
pub const SECRET_MASK: &str = "******";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_URL_EXPIRY_SECS: i32 = 3600;

/// What a client needs to reach a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// `host[:port]`, no scheme.
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
    pub use_ssl: bool,
    pub region: String,
}

impl ConnectionSettings {
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        format!("{}://{}", scheme, self.endpoint)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub id: i32,
    pub name: String,
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
    pub use_ssl: bool,
    pub is_private: bool,
    pub region: String,
    pub url_expiry: i32,
    pub is_active: bool,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StorageConfig {
    pub fn connection(&self) -> ConnectionSettings {
        ConnectionSettings {
            endpoint: self.endpoint.clone(),
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            bucket_name: self.bucket_name.clone(),
            use_ssl: self.use_ssl,
            region: self.region.clone(),
        }
    }

    pub fn masked(mut self) -> Self {
        self.secret_key = SECRET_MASK.to_string();
        self
    }
}

/// A config as submitted for create or update, defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfigDraft {
    pub name: String,
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
    pub use_ssl: bool,
    pub is_private: bool,
    pub region: String,
    pub url_expiry: i32,
    pub is_active: bool,
    pub description: String,
}

impl StorageConfigDraft {
    pub fn connection(&self) -> ConnectionSettings {
        ConnectionSettings {
            endpoint: self.endpoint.clone(),
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            bucket_name: self.bucket_name.clone(),
            use_ssl: self.use_ssl,
            region: self.region.clone(),
        }
    }

    /// Required fields present and `url_expiry` positive.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name),
            ("endpoint", &self.endpoint),
            ("access_key", &self.access_key),
            ("bucket_name", &self.bucket_name),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(format!("{} is required", field));
        }
        if self.url_expiry <= 0 {
            return Err("url_expiry must be positive".to_string());
        }
        Ok(())
    }
}

/// An empty or masked secret on update means "keep the stored one".
pub fn keeps_stored_secret(secret: &str) -> bool {
    secret.is_empty() || secret == SECRET_MASK
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileObject {
    pub id: Uuid,
    pub original_name: String,
    /// Object key inside the bucket.
    pub storage_path: String,
    pub content_type: String,
    pub file_size: i64,
    pub md5_hash: String,
    pub config_id: i32,
    pub is_public: bool,
    pub tags: BTreeMap<String, String>,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFileObject {
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
}

/// Object key for an upload: the file id followed by the original extension.
pub fn storage_key(id: Uuid, original_name: &str) -> String {
    match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}.{}", id, ext),
        _ => id.to_string(),
    }
}

/// Direct URL for a public object on a non-private bucket.
pub fn public_url(config: &StorageConfig, key: &str) -> String {
    format!(
        "{}/{}/{}",
        config.connection().endpoint_url(),
        config.bucket_name,
        key
    )
}
