//! In-process object store
//!
//! Keeps objects in a sorted map so listings come back in key order, like S3.
//! Used by integration tests and for running the remote provider without AWS.

use crate::traits::{ObjectInfo, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    content_type: String,
    metadata: HashMap<String, String>,
    last_modified: DateTime<Utc>,
}

/// Memory-backed storage
pub struct MemoryStorage {
    objects: RwLock<BTreeMap<String, StoredObject>>,
    base_url: String,
}

impl MemoryStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Store an object with an explicit modification time
    pub async fn insert_with_timestamp(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
        metadata: HashMap<String, String>,
        last_modified: DateTime<Utc>,
    ) {
        self.objects.write().await.insert(
            storage_key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
                metadata,
                last_modified,
            },
        );
    }

    /// Raw bytes and content type of a stored object
    pub async fn get_object(&self, storage_key: &str) -> StorageResult<(Bytes, String)> {
        self.objects
            .read()
            .await
            .get(storage_key)
            .map(|o| (o.data.clone(), o.content_type.clone()))
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new("memory://gallery")
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put_object(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &HashMap<String, String>,
    ) -> StorageResult<()> {
        if storage_key.is_empty() {
            return Err(StorageError::InvalidKey("empty key".to_string()));
        }

        let size = data.len();
        self.insert_with_timestamp(
            storage_key,
            data,
            content_type,
            metadata.clone(),
            Utc::now(),
        )
        .await;

        tracing::debug!(key = %storage_key, size_bytes = size, "Memory upload successful");
        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> StorageResult<Vec<ObjectInfo>> {
        let objects = self.objects.read().await;
        Ok(objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, object)| ObjectInfo {
                key: key.clone(),
                size: object.data.len() as u64,
                last_modified: object.last_modified,
            })
            .collect())
    }

    async fn get_metadata(&self, storage_key: &str) -> StorageResult<HashMap<String, String>> {
        self.objects
            .read()
            .await
            .get(storage_key)
            .map(|o| o.metadata.clone())
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.objects.read().await.contains_key(storage_key))
    }

    async fn get_presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        if !self.exists(storage_key).await? {
            return Err(StorageError::NotFound(storage_key.to_string()));
        }
        Ok(format!(
            "{}/{}?expires_in={}",
            self.base_url,
            storage_key,
            expires_in.as_secs()
        ))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
