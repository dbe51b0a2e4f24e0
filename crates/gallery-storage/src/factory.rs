#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageResult};
use gallery_core::RemoteCredentials;
use std::sync::Arc;

/// Create the object-store backend for the remote photo provider
#[cfg(feature = "storage-s3")]
pub fn create_storage(credentials: &RemoteCredentials) -> StorageResult<Arc<dyn Storage>> {
    let storage = S3Storage::new(credentials)?;
    tracing::info!(
        bucket = %credentials.bucket,
        region = %credentials.region,
        endpoint = ?credentials.endpoint,
        "S3 storage initialized"
    );
    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-s3"))]
pub fn create_storage(_credentials: &RemoteCredentials) -> StorageResult<Arc<dyn Storage>> {
    Err(crate::StorageError::ConfigError(
        "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
    ))
}

#[cfg(all(test, feature = "storage-s3"))]
mod tests {
    use super::*;

    #[test]
    fn test_create_storage_builds_s3_backend() {
        let credentials = RemoteCredentials {
            region: "eu-west-1".to_string(),
            access_key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
            bucket: "gallery-photos".to_string(),
            endpoint: Some("http://localhost:9000".to_string()),
        };

        let storage = create_storage(&credentials).expect("storage");
        assert_eq!(storage.backend_name(), "s3");
    }
}
