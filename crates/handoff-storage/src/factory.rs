#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{ObjectStorage, StorageError, StorageResult};
use handoff_core::BrokerConfig;
use std::sync::Arc;

/// Create the object store backend from broker configuration
pub async fn create_storage(config: &BrokerConfig) -> StorageResult<Arc<dyn ObjectStorage>> {
    let bucket = config
        .s3_bucket
        .clone()
        .ok_or_else(|| StorageError::ConfigError("AWS_BUCKET not configured".to_string()))?;
    let region = config.s3_region.clone().ok_or_else(|| {
        StorageError::ConfigError("AWS_DEFAULT_REGION not configured".to_string())
    })?;

    #[cfg(feature = "storage-s3")]
    {
        let storage = S3Storage::new(bucket, region, config.s3_endpoint.clone()).await?;
        Ok(Arc::new(storage))
    }

    #[cfg(not(feature = "storage-s3"))]
    {
        let _ = (bucket, region);
        Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        ))
    }
}
