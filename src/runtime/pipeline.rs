//! # Pipeline
//!
//! Resolve every requested blob, load the blobstore credentials, then download
//! the blobs one at a time. Any failure ends the run.

use crate::cli::{requests_or_default, Cli, Commands};
use crate::config::{blobstore_options, BlobRegistry, FetchSettings, ReleaseConfig};
use crate::error::FetchError;
use crate::fetcher::{fetch_blobs, resolve_blobs, BlobRequest, FetchedBlob, ResolvedBlob};
use crate::provider::{ObjectStore, S3ObjectStore};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Run the command selected on the command line
///
/// # Errors
///
/// Returns the first configuration, resolution or download failure.
pub async fn run(cli: Cli) -> Result<()> {
    let release = ReleaseConfig::from_arg_or_env(cli.release_path)?;
    let settings = FetchSettings::from_env().with_overrides(cli.region, cli.endpoint_url);

    match cli.command.unwrap_or_default() {
        Commands::Fetch { blobs, output_dir } => {
            let requests = requests_or_default(blobs);
            let fetched = fetch(&release, &settings, &requests, &output_dir).await?;
            info!("Done downloading {} blobs", fetched.len());
        }
        Commands::Resolve { blobs } => {
            let requests = requests_or_default(blobs);
            for blob in resolve(&release, &requests)? {
                println!("{}\t{}\t{}", blob.prefix, blob.key, blob.object_id);
            }
        }
    }

    Ok(())
}

/// Resolve requests against the release's `config/blobs.yml`
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded or a prefix does not resolve.
pub fn resolve(
    release: &ReleaseConfig,
    requests: &[BlobRequest],
) -> Result<Vec<ResolvedBlob>, FetchError> {
    let registry = BlobRegistry::load(release)?;
    resolve_blobs(&registry, requests)
}

/// Resolve, authenticate against S3, and download
///
/// # Errors
///
/// Returns an error if resolution, credential loading, or any download fails.
pub async fn fetch(
    release: &ReleaseConfig,
    settings: &FetchSettings,
    requests: &[BlobRequest],
    output_dir: &Path,
) -> Result<Vec<FetchedBlob>> {
    let resolved = resolve(release, requests).context("Failed to resolve release blobs")?;
    let options = blobstore_options(release).context("Failed to load blobstore credentials")?;

    info!(
        "Using bucket '{}' in region '{}'",
        options.bucket_name, settings.region
    );
    let store = S3ObjectStore::new(&options, settings).await;

    fetch_blobs(&store, &resolved, output_dir)
        .await
        .context("Failed to download release blobs")
}

/// Resolve and download against an already constructed store
///
/// # Errors
///
/// Returns an error if resolution or any download fails.
pub async fn fetch_with_store(
    store: &dyn ObjectStore,
    release: &ReleaseConfig,
    requests: &[BlobRequest],
    output_dir: &Path,
) -> Result<Vec<FetchedBlob>, FetchError> {
    let resolved = resolve(release, requests)?;
    fetch_blobs(store, &resolved, output_dir).await
}
