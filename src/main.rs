//! # fetch-release-blobs
//!
//! Downloads the ClamAV and PCRE2 source blobs of a release from its S3 blobstore.
//!
//! ## Usage
//!
//! ```bash
//! RELEASE_PATH=/path/to/release fetch-release-blobs
//! ```
//!
//! See `fetch-release-blobs --help` for the subcommands and overrides.

use anyhow::Result;
use clap::Parser;
use release_blob_fetcher::cli::Cli;
use release_blob_fetcher::runtime::{init_tracing, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    run(cli).await
}
