//! # Constants
//!
//! File locations and defaults shared by the resolver, the fetcher and the CLI.

/// Environment variable naming the release directory
pub const RELEASE_PATH_ENV: &str = "RELEASE_PATH";

/// Blob registry, relative to the release directory
pub const BLOBS_CONFIG_PATH: &str = "config/blobs.yml";

/// Final release config holding the blobstore section, relative to the release directory
pub const FINAL_CONFIG_PATH: &str = "config/final.yml";

/// Region used when neither `--region` nor `BLOBSTORE_REGION` is set
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default blobs to fetch, as (key prefix, destination file name)
pub const DEFAULT_BLOBS: &[(&str, &str)] = &[
    ("clamav/clamav-", "clamav-blob.tar.gz"),
    ("pcre2/pcre2-", "pcre2-blob.tar.gz"),
];

/// Provider name attached to the static credentials handed to the AWS SDK
pub const CREDENTIALS_PROVIDER_NAME: &str = "release-final-config";

/// Default tracing directive when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "release_blob_fetcher=info";
