//! # Command Line
//!
//! ```bash
//! # Download the ClamAV and PCRE2 blobs into the working directory
//! RELEASE_PATH=~/workspace/clamav-release fetch-release-blobs
//!
//! # Same, explicitly, into another directory
//! fetch-release-blobs --release-path ../clamav-release fetch --output-dir /tmp/blobs
//!
//! # Only show which objects would be fetched
//! fetch-release-blobs resolve --blob openssl/openssl-=openssl.tar.gz
//! ```

use crate::fetcher::BlobRequest;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Download release blobs from the release blobstore
#[derive(Debug, Parser)]
#[command(name = "fetch-release-blobs")]
#[command(about = "Download release blobs from the release blobstore", long_about = None)]
pub struct Cli {
    /// Defaults to `fetch` with the ClamAV and PCRE2 blobs
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Release directory containing config/blobs.yml and config/final.yml (defaults to $RELEASE_PATH)
    #[arg(long, global = true, value_name = "DIR")]
    pub release_path: Option<PathBuf>,

    /// Object store region (defaults to $BLOBSTORE_REGION, then us-east-1)
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// S3-compatible endpoint URL (defaults to $BLOBSTORE_ENDPOINT)
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Resolve blobs and download them
    Fetch {
        /// Blob to fetch, as registry key prefix and file name (repeatable)
        #[arg(long = "blob", value_name = "PREFIX=FILE")]
        blobs: Vec<BlobRequest>,

        /// Directory the files are written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Print the object id each blob resolves to, without downloading
    Resolve {
        /// Blob to resolve, as registry key prefix and file name (repeatable)
        #[arg(long = "blob", value_name = "PREFIX=FILE")]
        blobs: Vec<BlobRequest>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Fetch {
            blobs: Vec::new(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Requested blobs, or the defaults when none were given
pub fn requests_or_default(blobs: Vec<BlobRequest>) -> Vec<BlobRequest> {
    if blobs.is_empty() {
        BlobRequest::defaults()
    } else {
        blobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_means_default_fetch() {
        let cli = Cli::try_parse_from(["fetch-release-blobs"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.release_path.is_none());
        assert_eq!(cli.command.unwrap_or_default(), Commands::default());
    }

    #[test]
    fn test_fetch_with_blobs_and_output_dir() {
        let cli = Cli::try_parse_from([
            "fetch-release-blobs",
            "--release-path",
            "/release",
            "fetch",
            "--blob",
            "clamav/clamav-=clamav.tgz",
            "--blob",
            "pcre2/pcre2-=pcre2.tgz",
            "-o",
            "/tmp/out",
        ])
        .unwrap();

        assert_eq!(cli.release_path, Some(PathBuf::from("/release")));
        match cli.command {
            Some(Commands::Fetch { blobs, output_dir }) => {
                assert_eq!(blobs.len(), 2);
                assert_eq!(blobs[0], BlobRequest::new("clamav/clamav-", "clamav.tgz"));
                assert_eq!(output_dir, PathBuf::from("/tmp/out"));
            }
            other => panic!("Expected fetch command, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fetch-release-blobs",
            "resolve",
            "--region",
            "eu-west-1",
            "--endpoint-url",
            "http://localhost:9000",
        ])
        .unwrap();
        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
        assert_eq!(cli.endpoint_url.as_deref(), Some("http://localhost:9000"));
        assert!(matches!(cli.command, Some(Commands::Resolve { .. })));
    }

    #[test]
    fn test_malformed_blob_is_rejected() {
        let result = Cli::try_parse_from(["fetch-release-blobs", "fetch", "--blob", "clamav"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_requests_or_default() {
        assert_eq!(requests_or_default(Vec::new()), BlobRequest::defaults());
        let custom = vec![BlobRequest::new("x/", "x.tgz")];
        assert_eq!(requests_or_default(custom.clone()), custom);
    }
}
