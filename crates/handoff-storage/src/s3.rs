use crate::traits::{ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::{RetryConfig, RetryMode};
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use std::time::Duration;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        let region_provider = RegionProviderChain::first_try(aws_config::Region::new(region));

        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_retry_mode(RetryMode::Standard);

        // Credentials come from the standard AWS provider chain.
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .retry_config(retry_config.clone())
            .load()
            .await;

        let client = if let Some(ref endpoint) = endpoint_url {
            let mut s3_config_builder = aws_sdk_s3::Config::builder()
                .behavior_version(BehaviorVersion::latest())
                .endpoint_url(endpoint)
                .region(config.region().cloned())
                .retry_config(retry_config);
            if let Some(provider) = config.credentials_provider() {
                s3_config_builder = s3_config_builder.credentials_provider(provider);
            }
            // Path-style addressing for S3-compatible providers (MinIO etc.)
            Client::from_conf(s3_config_builder.force_path_style(true).build())
        } else {
            Client::new(&config)
        };

        Ok(Self::from_client(client, bucket))
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client, bucket: String) -> Self {
        S3Storage { client, bucket }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn presigned_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presigning_config = PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .map_err(|e| StorageError::PresignFailed(e.to_string()))?;

        // Content-Type is part of the signature: the upload must send the
        // same value or the store rejects it.
        let presigned_request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(storage_key)
            .content_type(content_type)
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    "S3 presign failed"
                );
                StorageError::PresignFailed(e.to_string())
            })?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %storage_key,
            content_type = %content_type,
            expires_in_secs = expires_in.as_secs(),
            "S3 presigned PUT generated"
        );

        Ok(presigned_request.uri().to_string())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(storage_key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => match e {
                SdkError::ServiceError(ref service_err) => match service_err.err() {
                    HeadObjectError::NotFound(_) => Ok(false),
                    _ => Err(StorageError::BackendError(e.to_string())),
                },
                _ => Err(StorageError::BackendError(e.to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::{Credentials, Region};

    fn storage() -> S3Storage {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("AKIDEXAMPLE", "secret", None, None, "static"))
            .build();
        S3Storage::from_client(Client::from_conf(config), "uploads-bucket".to_string())
    }

    #[tokio::test]
    async fn test_presigned_put_binds_content_type() {
        let url = storage()
            .presigned_put_url(
                "uploads/6f1c1f9e-5d3a-4c1b-9a8e-2f7d0c4b1a23/cat.png",
                "image/png",
                Duration::from_secs(900),
            )
            .await
            .unwrap();

        assert!(url.contains("uploads-bucket"), "{url}");
        assert!(url.contains("cat.png"), "{url}");
        assert!(url.contains("X-Amz-Expires=900"), "{url}");
        let signed_headers = url
            .split(['?', '&'])
            .find_map(|param| param.strip_prefix("X-Amz-SignedHeaders="))
            .unwrap_or_default();
        assert!(
            signed_headers.contains("content-type"),
            "content-type must be a signed header: {url}"
        );
    }

    #[tokio::test]
    async fn test_presign_rejects_expiry_beyond_a_week() {
        let result = storage()
            .presigned_put_url("uploads/x/a.png", "image/png", Duration::from_secs(8 * 24 * 3600))
            .await;
        assert!(matches!(result, Err(StorageError::PresignFailed(_))));
    }
}
