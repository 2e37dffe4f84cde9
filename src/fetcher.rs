//! # Blob Fetcher
//!
//! Resolves requested blobs against the registry and streams them out of the
//! object store, one after another.
//!
//! Every blob is resolved before the first download starts, so a missing
//! registry entry fails the run without touching the network.

use crate::config::BlobRegistry;
use crate::constants::DEFAULT_BLOBS;
use crate::error::FetchError;
use crate::provider::ObjectStore;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// A blob to fetch: registry key prefix and destination file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRequest {
    pub prefix: String,
    pub filename: PathBuf,
}

impl BlobRequest {
    pub fn new(prefix: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            filename: filename.into(),
        }
    }

    /// The ClamAV and PCRE2 source tarballs
    pub fn defaults() -> Vec<Self> {
        DEFAULT_BLOBS
            .iter()
            .map(|(prefix, filename)| Self::new(*prefix, *filename))
            .collect()
    }
}

impl FromStr for BlobRequest {
    type Err = FetchError;

    /// Parse `PREFIX=FILE`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((prefix, filename)) if !prefix.is_empty() && !filename.is_empty() => {
                Ok(Self::new(prefix, filename))
            }
            _ => Err(FetchError::InvalidBlobSpec(s.to_string())),
        }
    }
}

/// A blob whose object id has been found in the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBlob {
    pub prefix: String,
    /// Registry key the prefix matched
    pub key: String,
    pub object_id: String,
    pub filename: PathBuf,
}

/// Outcome of a single download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBlob {
    pub object_id: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Resolve every request against the registry
///
/// # Errors
///
/// Returns [`FetchError::BlobNotFound`] for the first request whose prefix has no
/// matching entry, or whose first matching entry has no `object_id`.
pub fn resolve_blobs(
    registry: &BlobRegistry,
    requests: &[BlobRequest],
) -> Result<Vec<ResolvedBlob>, FetchError> {
    requests
        .iter()
        .map(|request| {
            let object_id = registry
                .object_id_by_prefix(&request.prefix)
                .ok_or_else(|| not_found(request))?;
            let (key, entry) = registry
                .find_by_prefix(&request.prefix)
                .ok_or_else(|| not_found(request))?;
            debug!(
                "Resolved '{}' to blob '{}' (object {}, {} bytes)",
                request.prefix,
                key,
                object_id,
                entry.size.map_or_else(|| "?".to_string(), |s| s.to_string())
            );
            Ok(ResolvedBlob {
                prefix: request.prefix.clone(),
                key: key.to_string(),
                object_id: object_id.to_string(),
                filename: request.filename.clone(),
            })
        })
        .collect()
}

fn not_found(request: &BlobRequest) -> FetchError {
    FetchError::BlobNotFound {
        prefix: request.prefix.clone(),
    }
}

/// Download one object into `destination`
///
/// The destination is created or truncated, never appended to. A failure part way
/// through leaves whatever was written in place.
///
/// # Errors
///
/// Returns an error if the object store request fails or the file cannot be written.
pub async fn download_blob(
    store: &dyn ObjectStore,
    object_id: &str,
    destination: &Path,
) -> Result<u64, FetchError> {
    let write_err = |source: std::io::Error| FetchError::Write {
        key: object_id.to_string(),
        path: destination.to_path_buf(),
        source,
    };

    let mut body = store.get_object(object_id).await?;
    let mut file = tokio::fs::File::create(destination)
        .await
        .map_err(write_err)?;
    let bytes = tokio::io::copy(&mut body, &mut file)
        .await
        .map_err(write_err)?;
    file.flush().await.map_err(write_err)?;

    Ok(bytes)
}

/// Download resolved blobs into `output_dir`, strictly in order
///
/// # Errors
///
/// Stops at the first failed download; earlier files stay on disk.
pub async fn fetch_blobs(
    store: &dyn ObjectStore,
    blobs: &[ResolvedBlob],
    output_dir: &Path,
) -> Result<Vec<FetchedBlob>, FetchError> {
    let mut fetched = Vec::with_capacity(blobs.len());

    for blob in blobs {
        let path = output_dir.join(&blob.filename);
        info!(
            "Downloading {} from s3://{}/{} to {}",
            blob.key,
            store.bucket(),
            blob.object_id,
            path.display()
        );

        let bytes = download_blob(store, &blob.object_id, &path).await?;
        info!("✅ Wrote {} bytes to {}", bytes, path.display());

        fetched.push(FetchedBlob {
            object_id: blob.object_id.clone(),
            path,
            bytes,
        });
    }

    Ok(fetched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlobEntry;
    use crate::provider::MemoryObjectStore;

    fn entry(object_id: Option<&str>) -> BlobEntry {
        BlobEntry {
            object_id: object_id.map(str::to_string),
            ..BlobEntry::default()
        }
    }

    #[test]
    fn test_blob_request_from_str() {
        let request: BlobRequest = "clamav/clamav-=clamav-blob.tar.gz".parse().unwrap();
        assert_eq!(request.prefix, "clamav/clamav-");
        assert_eq!(request.filename, PathBuf::from("clamav-blob.tar.gz"));
    }

    #[test]
    fn test_blob_request_rejects_missing_parts() {
        for spec in ["clamav", "=file.tgz", "prefix=", ""] {
            let err = spec.parse::<BlobRequest>().unwrap_err();
            assert!(
                matches!(err, FetchError::InvalidBlobSpec(ref s) if s == spec),
                "spec {spec:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_default_requests() {
        let defaults = BlobRequest::defaults();
        assert_eq!(
            defaults,
            vec![
                BlobRequest::new("clamav/clamav-", "clamav-blob.tar.gz"),
                BlobRequest::new("pcre2/pcre2-", "pcre2-blob.tar.gz"),
            ]
        );
    }

    #[test]
    fn test_resolve_blobs_in_request_order() {
        let registry = BlobRegistry::from_entries(vec![
            ("pcre2/pcre2-10.42.tar.gz".to_string(), entry(Some("p-1"))),
            ("clamav/clamav-1.0.tar.gz".to_string(), entry(Some("c-1"))),
        ]);
        let resolved = resolve_blobs(&registry, &BlobRequest::defaults()).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].key, "clamav/clamav-1.0.tar.gz");
        assert_eq!(resolved[0].object_id, "c-1");
        assert_eq!(resolved[1].object_id, "p-1");
        assert_eq!(resolved[1].filename, PathBuf::from("pcre2-blob.tar.gz"));
    }

    #[test]
    fn test_resolve_blobs_missing_prefix() {
        let registry = BlobRegistry::from_entries(vec![(
            "clamav/clamav-1.0.tar.gz".to_string(),
            entry(Some("c-1")),
        )]);
        let err = resolve_blobs(&registry, &BlobRequest::defaults()).unwrap_err();
        assert!(matches!(err, FetchError::BlobNotFound { ref prefix } if prefix == "pcre2/pcre2-"));
    }

    #[test]
    fn test_resolve_blobs_entry_without_object_id() {
        let registry = BlobRegistry::from_entries(vec![(
            "clamav/clamav-1.0.tar.gz".to_string(),
            entry(None),
        )]);
        let requests = vec![BlobRequest::new("clamav/clamav-", "c.tgz")];
        let err = resolve_blobs(&registry, &requests).unwrap_err();
        assert!(matches!(err, FetchError::BlobNotFound { .. }));
    }

    #[test]
    fn test_resolve_blobs_agrees_with_registry_lookup() {
        let registry = BlobRegistry::from_entries(vec![
            ("clamav/clamav-1.1.tar.gz".to_string(), entry(None)),
            ("clamav/clamav-1.0.tar.gz".to_string(), entry(Some("c-old"))),
            ("pcre2/pcre2-10.42.tar.gz".to_string(), entry(Some("p-1"))),
            ("pcre2/pcre2-10.40.tar.gz".to_string(), entry(Some("p-0"))),
        ]);

        let clamav = vec![BlobRequest::new("clamav/clamav-", "c.tgz")];
        assert!(resolve_blobs(&registry, &clamav).is_err());
        assert_eq!(registry.object_id_by_prefix("clamav/clamav-"), None);

        let pcre2 = vec![BlobRequest::new("pcre2/pcre2-", "p.tgz")];
        let resolved = resolve_blobs(&registry, &pcre2).unwrap();
        assert_eq!(
            Some(resolved[0].object_id.as_str()),
            registry.object_id_by_prefix("pcre2/pcre2-")
        );
        assert_eq!(resolved[0].key, "pcre2/pcre2-10.42.tar.gz");
    }

    #[tokio::test]
    async fn test_download_blob_writes_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clamav-blob.tar.gz");
        let store = MemoryObjectStore::new("bucket").with_object("abc123", "hello");

        let bytes = download_blob(&store, "abc123", &path).await.unwrap();

        assert_eq!(bytes, 5);
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_download_blob_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clamav-blob.tar.gz");
        std::fs::write(&path, "stale content that is longer than the object").unwrap();
        let store = MemoryObjectStore::new("bucket").with_object("abc123", "hello");

        download_blob(&store, "abc123", &path).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_download_blob_missing_key_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.tar.gz");
        let store = MemoryObjectStore::new("bucket");

        let err = download_blob(&store, "nope", &path).await.unwrap_err();

        assert!(matches!(err, FetchError::ObjectStore { .. }));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_download_blob_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("blob.tar.gz");
        let store = MemoryObjectStore::new("bucket").with_object("abc123", "hello");

        let err = download_blob(&store, "abc123", &path).await.unwrap_err();

        assert!(matches!(err, FetchError::Write { ref key, .. } if key == "abc123"));
    }

    #[tokio::test]
    async fn test_fetch_blobs_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryObjectStore::new("bucket").with_object("c-1", "clamav");
        let blobs = vec![
            ResolvedBlob {
                prefix: "clamav/clamav-".to_string(),
                key: "clamav/clamav-1.0.tar.gz".to_string(),
                object_id: "c-1".to_string(),
                filename: PathBuf::from("clamav-blob.tar.gz"),
            },
            ResolvedBlob {
                prefix: "pcre2/pcre2-".to_string(),
                key: "pcre2/pcre2-10.42.tar.gz".to_string(),
                object_id: "p-1".to_string(),
                filename: PathBuf::from("pcre2-blob.tar.gz"),
            },
        ];

        let err = fetch_blobs(&store, &blobs, dir.path()).await.unwrap_err();

        assert!(matches!(err, FetchError::ObjectStore { ref key, .. } if key == "p-1"));
        assert_eq!(
            std::fs::read(dir.path().join("clamav-blob.tar.gz")).unwrap(),
            b"clamav"
        );
        assert!(!dir.path().join("pcre2-blob.tar.gz").exists());
    }
}
