//! # S3 Object Store
//!
//! Client for downloading release blobs from Amazon S3.
//!
//! This module provides functionality to:
//! - Authenticate with the static credentials from `config/final.yml`
//! - Stream objects out of the release bucket with GetObject
//! - Target S3-compatible endpoints with path-style addressing

mod auth;

use aws_sdk_s3::Client as S3Client;
use async_trait::async_trait;
use tracing::debug;

use super::{ObjectReader, ObjectStore};
use crate::config::{BlobstoreOptions, FetchSettings};
use crate::error::FetchError;

use self::auth::create_sdk_config;

/// S3 provider implementation
pub struct S3ObjectStore {
    pub(crate) client: S3Client,
    bucket: String,
    region: String,
}

impl std::fmt::Debug for S3ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStore")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl S3ObjectStore {
    /// Create a new S3 client for the bucket named in `options`
    pub async fn new(options: &BlobstoreOptions, settings: &FetchSettings) -> Self {
        let sdk_config = create_sdk_config(options, settings).await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.endpoint_url.is_some())
            .build();

        Self {
            client: S3Client::from_conf(s3_config),
            bucket: options.bucket_name.clone(),
            region: settings.region.clone(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn get_object(&self, key: &str) -> Result<ObjectReader, FetchError> {
        debug!("GetObject s3://{}/{}", self.bucket, key);

        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| FetchError::ObjectStore {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                source: Box::new(e),
            })?;

        if let Some(length) = output.content_length() {
            debug!("Object '{}' is {} bytes", key, length);
        }

        Ok(Box::pin(output.body.into_async_read()))
    }
}
