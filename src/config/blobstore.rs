//! # Blobstore Credentials
//!
//! Reads the `blobstore` section of `config/final.yml`:
//!
//! ```yaml
//! final_name: clamav
//! blobstore:
//!   provider: s3
//!   options:
//!     bucket_name: clamav-release-blobs
//!     access_key_id: AKIA...
//!     secret_access_key: ...
//! ```

use super::release::{read_yaml, ReleaseConfig};
use crate::error::FetchError;
use serde::Deserialize;
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Credentials and bucket under `blobstore.options`
///
/// The secret key is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct BlobstoreOptions {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
}

impl std::fmt::Debug for BlobstoreOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobstoreOptions")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("bucket_name", &self.bucket_name)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct FinalConfig {
    #[serde(default)]
    final_name: Option<String>,
    #[serde(default)]
    blobstore: Option<BlobstoreSection>,
}

#[derive(Debug, Deserialize)]
struct BlobstoreSection {
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    options: Option<BlobstoreOptions>,
}

/// Load the blobstore options from `config/final.yml`
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if `blobstore` or
/// `blobstore.options` is missing, or if one of the three fields is absent.
pub fn blobstore_options(release: &ReleaseConfig) -> Result<BlobstoreOptions, FetchError> {
    let path = release.final_config_path();
    let config: FinalConfig = read_yaml(&path)?;

    let section = config.blobstore.ok_or_else(|| FetchError::MissingSection {
        path: path.clone(),
        section: "blobstore",
    })?;

    match section.provider.as_deref() {
        Some("s3") | None => {}
        Some(other) => warn!(
            "Blobstore provider is '{}', fetching with the S3 protocol anyway",
            other
        ),
    }

    let options = section.options.ok_or(FetchError::MissingSection {
        path,
        section: "blobstore.options",
    })?;

    debug!(
        "Blobstore for release '{}': bucket '{}'",
        config.final_name.as_deref().unwrap_or("<unnamed>"),
        options.bucket_name
    );

    Ok(options)
}
