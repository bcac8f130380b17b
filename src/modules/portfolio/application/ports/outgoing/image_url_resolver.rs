use async_trait::async_trait;
use uuid::Uuid;

/// Turns an attached file-object id into a URL. Failures yield `None`.
#[async_trait]
pub trait ImageUrlResolver: Send + Sync {
    async fn resolve(&self, object_id: Uuid) -> Option<String>;
}
