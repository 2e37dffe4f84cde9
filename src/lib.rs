//! # Release Blob Fetcher
//!
//! Resolves blob object ids from a BOSH release configuration and downloads the
//! blobs from the release's S3 blobstore.
//!
//! ## Overview
//!
//! 1. **Config resolver** - reads `config/blobs.yml` and finds the first blob whose
//!    key contains a prefix (e.g. `clamav/clamav-`), then reads the blobstore
//!    credentials from `config/final.yml`
//! 2. **Object fetcher** - opens an S3 client with those credentials and streams
//!    each object to a local file, overwriting it
//!
//! Downloads run one after another. Nothing is retried or verified.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod provider;
pub mod runtime;

pub use config::{get_blob_id_by_prefix, BlobstoreOptions, ReleaseConfig};
pub use error::FetchError;
pub use fetcher::{download_blob, BlobRequest};
pub use provider::ObjectStore;
