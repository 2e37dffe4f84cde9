//! # In-Memory Object Store
//!
//! Serves objects from a map. Unknown keys fail the same way a missing S3 key does.

use super::{ObjectReader, ObjectStore};
use crate::error::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Cursor;

/// Object store backed by a `HashMap`
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    bucket: String,
    objects: HashMap<String, Vec<u8>>,
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: HashMap::new(),
        }
    }

    /// Add or replace an object
    #[must_use]
    pub fn with_object(mut self, key: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.objects.insert(key.into(), body.into());
        self
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn get_object(&self, key: &str) -> Result<ObjectReader, FetchError> {
        let body = self
            .objects
            .get(key)
            .cloned()
            .ok_or_else(|| FetchError::ObjectStore {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                source: "NoSuchKey: The specified key does not exist.".into(),
            })?;
        Ok(Box::pin(Cursor::new(body)))
    }
}
