//! # Object Store Providers
//!
//! The fetcher only needs one call from an object store: GET an object by key and
//! stream its body.
//!
//! - `s3`: Amazon S3 (or an S3-compatible endpoint) via the AWS Rust SDK
//! - `memory`: in-process store backing the fetcher and pipeline tests

pub mod memory;
pub mod s3;

pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;

use crate::error::FetchError;
use async_trait::async_trait;
use std::pin::Pin;
use tokio::io::AsyncRead;

/// Streaming body of a fetched object
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send>>;

/// Read access to a single bucket of an object store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bucket every request is made against
    fn bucket(&self) -> &str;

    /// Request the object stored under `key`
    ///
    /// The returned reader yields the object content; nothing is buffered up front.
    async fn get_object(&self, key: &str) -> Result<ObjectReader, FetchError>;
}
