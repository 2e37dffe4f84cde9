//! # Blob Registry
//!
//! `config/blobs.yml` maps blob paths to their blobstore records:
//!
//! ```yaml
//! clamav/clamav-0.99.2.tar.gz:
//!   size: 6131543
//!   object_id: 3b9e6c6a-2f0d-4a8e-6a5f-0e1d2c3b4a59
//!   sha: 7bd2bb2d8b1e1b0d6c4e4f3d3a1b2c3d4e5f6a7b
//! ```
//!
//! Document order matters: prefix lookup returns the first matching key.

use super::release::{read_yaml, ReleaseConfig};
use crate::error::FetchError;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::fmt;
use tracing::{debug, warn};

/// Blobstore record of a single blob
///
/// Fields are read leniently: a value of an unexpected type reads as absent
/// rather than failing the whole registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlobEntry {
    /// Key of the blob in the object store. Absent for blobs not yet uploaded.
    #[serde(default, deserialize_with = "lenient_string")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub size: Option<u64>,
    /// Carried for completeness; downloads are not verified against it
    #[serde(default, deserialize_with = "lenient_string")]
    pub sha: Option<String>,
}

impl BlobEntry {
    /// Entry from an arbitrary YAML value; anything that is not a record reads as empty
    fn from_value(key: &str, value: Value) -> Self {
        serde_yaml::from_value(value).unwrap_or_else(|e| {
            debug!("Blob '{}' is not a blob record ({}), treating it as empty", key, e);
            Self::default()
        })
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_u64())
}

/// Ordered blob registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobRegistry {
    entries: Vec<(String, BlobEntry)>,
}

impl BlobRegistry {
    pub fn from_entries(entries: Vec<(String, BlobEntry)>) -> Self {
        Self { entries }
    }

    /// Load `config/blobs.yml` from a release
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or is not a mapping of blob records.
    pub fn load(release: &ReleaseConfig) -> Result<Self, FetchError> {
        let registry: Self = read_yaml(&release.blobs_path())?;
        debug!("Loaded {} blob registry entries", registry.len());
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BlobEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// First entry whose key contains `prefix` as a substring
    pub fn find_by_prefix(&self, prefix: &str) -> Option<(&str, &BlobEntry)> {
        self.iter().find(|(key, _)| key.contains(prefix))
    }

    /// Object id of the first entry whose key contains `prefix`
    ///
    /// Returns `None` when nothing matches, or when the first match has no `object_id`.
    /// Later matches are not consulted.
    pub fn object_id_by_prefix(&self, prefix: &str) -> Option<&str> {
        let (key, entry) = self.find_by_prefix(prefix)?;
        if entry.object_id.is_none() {
            warn!("Blob '{}' matches prefix '{}' but has no object_id", key, prefix);
        }
        entry.object_id.as_deref()
    }
}

impl<'de> Deserialize<'de> for BlobRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};

        struct BlobRegistryVisitor;

        impl<'de> Visitor<'de> for BlobRegistryVisitor {
            type Value = BlobRegistry;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping of blob paths to blob records")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                // Keep document order so "first match" is stable
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    let entry = BlobEntry::from_value(&key, value);
                    entries.push((key, entry));
                }
                Ok(BlobRegistry { entries })
            }

            // `~`
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(BlobRegistry::default())
            }

            // Empty file, or a document with no body
            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(BlobRegistry::default())
            }
        }

        deserializer.deserialize_any(BlobRegistryVisitor)
    }
}

/// Resolve a blob's object id by key prefix
///
/// Reads `config/blobs.yml` fresh. `Ok(None)` means no usable match; only I/O and
/// parse failures are errors.
///
/// # Errors
///
/// Returns an error if the registry cannot be read or parsed.
pub fn get_blob_id_by_prefix(
    release: &ReleaseConfig,
    prefix: &str,
) -> Result<Option<String>, FetchError> {
    let registry = BlobRegistry::load(release)?;
    Ok(registry.object_id_by_prefix(prefix).map(str::to_owned))
}
