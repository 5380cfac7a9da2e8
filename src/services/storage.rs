//! Image storage backed by the `object_store` crate (S3/MinIO, local filesystem, memory).
//!
//! Each store is bound to one bucket at construction; writes addressed to any other
//! bucket are refused instead of silently landing in the wrong place.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use thiserror::Error;

use crate::config::ImageStoreConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object storage error: {0}")]
    ObjectStore(#[from] object_store::Error),
    #[error("invalid object key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
    #[error("store is bound to bucket '{bound}', refusing write to '{requested}'")]
    UnknownBucket { bound: String, requested: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait ImageStore: Send + Sync + 'static {
    fn backend_name(&self) -> &'static str;

    // Write `data` under `key`. Any failure is final; callers do not retry.
    async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct ObjectImageStore {
    backend: &'static str,
    bucket: String,
    inner: Arc<dyn ObjectStore>,
}

impl ObjectImageStore {
    pub async fn new(
        config: &ImageStoreConfig,
        bucket: &str,
        region: &str,
    ) -> Result<Self, StorageError> {
        let (backend, inner): (&'static str, Arc<dyn ObjectStore>) = match config {
            ImageStoreConfig::Memory => ("memory", Arc::new(InMemory::new())),

            ImageStoreConfig::Local { root } => {
                let path = root.join(bucket);
                tokio::fs::create_dir_all(&path).await?;
                let fs = LocalFileSystem::new_with_prefix(&path)
                    .map_err(|e| StorageError::InvalidConfig(e.to_string()))?;
                ("local", Arc::new(fs))
            }

            ImageStoreConfig::S3 { endpoint } => {
                // Credentials come from the usual AWS_* variables / instance metadata.
                let mut builder = AmazonS3Builder::from_env()
                    .with_bucket_name(bucket)
                    .with_region(region);
                if let Some(endpoint) = endpoint {
                    builder = builder
                        .with_endpoint(endpoint)
                        .with_allow_http(endpoint.starts_with("http://"));
                }
                let s3 = builder
                    .build()
                    .map_err(|e| StorageError::InvalidConfig(e.to_string()))?;
                ("s3", Arc::new(s3))
            }
        };

        Ok(Self {
            backend,
            bucket: bucket.to_string(),
            inner,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> Arc<dyn ObjectStore> {
        self.inner.clone()
    }
}

#[async_trait]
impl ImageStore for ObjectImageStore {
    fn backend_name(&self) -> &'static str {
        self.backend
    }

    async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> Result<(), StorageError> {
        if bucket != self.bucket {
            return Err(StorageError::UnknownBucket {
                bound: self.bucket.clone(),
                requested: bucket.to_string(),
            });
        }

        let path = ObjectPath::parse(key).map_err(|e| StorageError::InvalidKey {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        let size = data.len();
        self.inner.put(&path, data.into()).await?;

        tracing::debug!(bucket = %self.bucket, key = %key, size, "object stored");
        Ok(())
    }
}
