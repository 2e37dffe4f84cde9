//! # Fetch Error Types
//!
//! Every failure in the resolve/download pipeline. None of them are retried;
//! the binary reports the error chain and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised while resolving or downloading release blobs
#[derive(Debug, Error)]
pub enum FetchError {
    /// `RELEASE_PATH` is not set and no `--release-path` was given
    #[error("release path is not configured: set {env_var} or pass --release-path")]
    ReleasePathNotSet { env_var: &'static str },

    /// A release config file could not be read
    #[error("failed to read {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A release config file is not valid YAML for the expected shape
    #[error("failed to parse {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A required section is missing from a release config file
    #[error("{} has no '{section}' section", .path.display())]
    MissingSection {
        path: PathBuf,
        section: &'static str,
    },

    /// No blob registry entry matched the prefix, or the entry has no object id
    #[error("no blob with an object_id matches prefix '{prefix}'")]
    BlobNotFound { prefix: String },

    /// A `--blob` argument was not of the form `PREFIX=FILE`
    #[error("invalid blob spec '{0}': expected PREFIX=FILE")]
    InvalidBlobSpec(String),

    /// The object store rejected or failed the GET request
    #[error("failed to get object '{key}' from bucket '{bucket}'")]
    ObjectStore {
        bucket: String,
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Streaming the object into the destination file failed
    #[error("failed to write object '{key}' to {}", .path.display())]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
