use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::storage::application::domain::{
    public_url, ConnectionSettings, FileObject, StorageConfig,
};
use crate::storage::application::ports::outgoing::{
    ActivationHook, ObjectStoreClient, ObjectStoreConnector, ObjectStoreError, PutObject,
};

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const PRESIGN_TIMEOUT: Duration = Duration::from_secs(5);
pub const DELETE_TIMEOUT: Duration = Duration::from_secs(30);
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Object storage is not initialized")]
    NotInitialized,

    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        operation: &'static str,
        seconds: u64,
    },

    #[error(transparent)]
    Store(#[from] ObjectStoreError),
}

async fn with_timeout<T, F>(
    operation: &'static str,
    limit: Duration,
    fut: F,
) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, ObjectStoreError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| GatewayError::Timeout {
            operation,
            seconds: limit.as_secs(),
        })?
        .map_err(GatewayError::from)
}

/// The active config together with a client connected to it. Replaced whole, never mutated.
pub struct ActiveStorage {
    pub config: StorageConfig,
    pub client: Arc<dyn ObjectStoreClient>,
}

impl ActiveStorage {
    pub async fn upload(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> Result<(), GatewayError> {
        let object = PutObject {
            bucket: self.config.bucket_name.clone(),
            key: key.to_string(),
            body,
            content_type: content_type.to_string(),
            metadata,
        };
        with_timeout("upload", UPLOAD_TIMEOUT, self.client.put_object(object)).await
    }

    pub async fn url_for(&self, file: &FileObject) -> Result<String, GatewayError> {
        if file.is_public && !self.config.is_private {
            return Ok(public_url(&self.config, &file.storage_path));
        }

        let expiry = Duration::from_secs(self.config.url_expiry.max(1) as u64);
        with_timeout(
            "presign",
            PRESIGN_TIMEOUT,
            self.client
                .presign_get(&self.config.bucket_name, &file.storage_path, expiry),
        )
        .await
    }

    pub async fn remove(&self, key: &str) -> Result<(), GatewayError> {
        with_timeout(
            "delete",
            DELETE_TIMEOUT,
            self.client.delete_object(&self.config.bucket_name, key),
        )
        .await
    }
}

/// Process-wide handle on the active object store.
///
/// Readers clone the inner `Arc` and drop the lock before any I/O, so a switchover never
/// waits on an upload in flight and an upload never sees half of a config change.
pub struct StorageGateway {
    connector: Arc<dyn ObjectStoreConnector>,
    active: RwLock<Option<Arc<ActiveStorage>>>,
}

impl StorageGateway {
    pub fn new(connector: Arc<dyn ObjectStoreConnector>) -> Self {
        Self {
            connector,
            active: RwLock::new(None),
        }
    }

    pub async fn current(&self) -> Result<Arc<ActiveStorage>, GatewayError> {
        self.active
            .read()
            .await
            .clone()
            .ok_or(GatewayError::NotInitialized)
    }

    pub async fn active_config_id(&self) -> Option<i32> {
        self.active.read().await.as_ref().map(|a| a.config.id)
    }

    /// Connects, creates the bucket when missing, then swaps the pair in.
    /// On failure the previous pair stays in place.
    pub async fn initialize(&self, config: StorageConfig) -> Result<(), GatewayError> {
        let client = self.connector.connect(&config.connection())?;
        let bucket = config.bucket_name.clone();

        let prepare = async {
            if !client.bucket_exists(&bucket).await? {
                client.create_bucket(&bucket).await?;
                info!(bucket = %bucket, "Created storage bucket");
            }
            Ok::<(), ObjectStoreError>(())
        };
        with_timeout("initialize", CONNECT_TIMEOUT, prepare).await?;

        info!(config_id = config.id, name = %config.name, "Object storage client initialized");
        *self.active.write().await = Some(Arc::new(ActiveStorage { config, client }));
        Ok(())
    }

    /// Bucket existence check only; nothing is stored.
    pub async fn test_connection(&self, settings: &ConnectionSettings) -> Result<(), GatewayError> {
        let client = self.connector.connect(settings)?;
        with_timeout(
            "connection test",
            CONNECT_TIMEOUT,
            client.bucket_exists(&settings.bucket_name),
        )
        .await
        .map(|_| ())
    }

    /// Drops the client if it belongs to `config_id`.
    pub async fn forget(&self, config_id: i32) {
        let mut active = self.active.write().await;
        if active.as_ref().is_some_and(|a| a.config.id == config_id) {
            warn!(config_id, "Active storage config was deactivated; client dropped");
            *active = None;
        }
    }
}

#[async_trait]
impl ActivationHook for StorageGateway {
    async fn activated(&self, config: &StorageConfig) -> Result<(), String> {
        self.initialize(config.clone())
            .await
            .map_err(|e| e.to_string())
    }
}
