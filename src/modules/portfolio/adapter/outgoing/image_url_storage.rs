use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::portfolio::application::ports::outgoing::ImageUrlResolver;
use crate::storage::application::ports::incoming::use_cases::GetFileUrlUseCase;

/// Resolves portfolio images through the storage module's URL use case.
pub struct StorageImageUrlResolver {
    file_url: Arc<dyn GetFileUrlUseCase + Send + Sync>,
}

impl StorageImageUrlResolver {
    pub fn new(file_url: Arc<dyn GetFileUrlUseCase + Send + Sync>) -> Self {
        Self { file_url }
    }
}

#[async_trait]
impl ImageUrlResolver for StorageImageUrlResolver {
    async fn resolve(&self, object_id: Uuid) -> Option<String> {
        match self.file_url.execute(object_id).await {
            Ok(url) => Some(url),
            Err(e) => {
                debug!(object_id = %object_id, error = %e, "No URL for portfolio image");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::application::ports::incoming::use_cases::StorageError;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        pub FileUrl {}
        #[async_trait]
        impl GetFileUrlUseCase for FileUrl {
            async fn execute(&self, file_id: Uuid) -> Result<String, StorageError>;
        }
    }

    #[tokio::test]
    async fn test_resolves_url() {
        let id = Uuid::new_v4();
        let mut file_url = MockFileUrl::new();
        file_url
            .expect_execute()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok("http://minio.local:9000/media/cover.png".to_string()));

        let resolver = StorageImageUrlResolver::new(Arc::new(file_url));

        assert_eq!(
            resolver.resolve(id).await.as_deref(),
            Some("http://minio.local:9000/media/cover.png")
        );
    }

    #[tokio::test]
    async fn test_storage_errors_become_none() {
        let mut file_url = MockFileUrl::new();
        file_url
            .expect_execute()
            .returning(|_| Err(StorageError::NotInitialized));

        let resolver = StorageImageUrlResolver::new(Arc::new(file_url));

        assert_eq!(resolver.resolve(Uuid::new_v4()).await, None);
    }
}
