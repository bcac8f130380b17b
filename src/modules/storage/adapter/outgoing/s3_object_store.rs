use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::storage::application::domain::{ConnectionSettings, DEFAULT_REGION};
use crate::storage::application::ports::outgoing::{
    ObjectStoreClient, ObjectStoreConnector, ObjectStoreError, PutObject,
};

/// Builds path-style S3 clients, which is what MinIO expects.
#[derive(Clone, Default)]
pub struct S3Connector;

impl ObjectStoreConnector for S3Connector {
    fn connect(
        &self,
        settings: &ConnectionSettings,
    ) -> Result<Arc<dyn ObjectStoreClient>, ObjectStoreError> {
        if settings.endpoint.trim().is_empty() {
            return Err(ObjectStoreError::InvalidConfig(
                "endpoint is empty".to_string(),
            ));
        }

        let credentials = Credentials::new(
            settings.access_key.clone(),
            settings.secret_key.clone(),
            None,
            None,
            "showcase-storage",
        );

        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(settings.endpoint_url())
            .region(Region::new(settings.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Ok(Arc::new(S3ObjectStore {
            client: Client::from_conf(config),
            region: settings.region.clone(),
        }))
    }
}

pub struct S3ObjectStore {
    client: Client,
    region: String,
}

fn request_failed(e: impl std::fmt::Display) -> ObjectStoreError {
    ObjectStoreError::RequestFailed(e.to_string())
}

#[async_trait]
impl ObjectStoreClient for S3ObjectStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ObjectStoreError> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let missing = e
                    .as_service_error()
                    .map(|se| se.is_not_found())
                    .unwrap_or(false);
                if missing {
                    Ok(false)
                } else {
                    Err(request_failed(aws_sdk_s3::error::DisplayErrorContext(&e)))
                }
            }
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), ObjectStoreError> {
        let mut request = self.client.create_bucket().bucket(bucket);
        if self.region != DEFAULT_REGION {
            let location = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                .build();
            request = request.create_bucket_configuration(location);
        }

        request
            .send()
            .await
            .map_err(|e| request_failed(aws_sdk_s3::error::DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn put_object(&self, object: PutObject) -> Result<(), ObjectStoreError> {
        self.client
            .put_object()
            .bucket(object.bucket)
            .key(object.key)
            .body(ByteStream::from(object.body))
            .content_type(object.content_type)
            .set_metadata(Some(object.metadata))
            .send()
            .await
            .map_err(|e| request_failed(aws_sdk_s3::error::DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, ObjectStoreError> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(request_failed)?;
        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| request_failed(aws_sdk_s3::error::DisplayErrorContext(&e)))?;
        Ok(request.uri().to_string())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ObjectStoreError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| request_failed(aws_sdk_s3::error::DisplayErrorContext(&e)))?;
        Ok(())
    }
}
