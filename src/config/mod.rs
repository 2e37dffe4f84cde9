//! # Release Configuration
//!
//! Everything read before the first network call: the release directory, the
//! blob registry (`config/blobs.yml`), the blobstore credentials
//! (`config/final.yml`), and object store settings from the environment.

mod blobs;
mod blobstore;
mod release;
mod settings;

pub use blobs::{get_blob_id_by_prefix, BlobEntry, BlobRegistry};
pub use blobstore::{blobstore_options, BlobstoreOptions};
pub use release::ReleaseConfig;
pub use settings::FetchSettings;
