use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::storage::application::domain::ConnectionSettings;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectStoreError {
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Object store request failed: {0}")]
    RequestFailed(String),
}

#[derive(Debug, Clone)]
pub struct PutObject {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
    /// User metadata stored alongside the object.
    pub metadata: HashMap<String, String>,
}

/// One S3-compatible endpoint. Implementations do not apply timeouts.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ObjectStoreError>;

    async fn create_bucket(&self, bucket: &str) -> Result<(), ObjectStoreError>;

    async fn put_object(&self, object: PutObject) -> Result<(), ObjectStoreError>;

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, ObjectStoreError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ObjectStoreError>;
}

/// Builds clients from connection settings without touching the network.
pub trait ObjectStoreConnector: Send + Sync {
    fn connect(
        &self,
        settings: &ConnectionSettings,
    ) -> Result<Arc<dyn ObjectStoreClient>, ObjectStoreError>;
}
