//! # Initialization
//!
//! Tracing subscriber setup for the binary.

use crate::constants::DEFAULT_LOG_FILTER;

/// Install the fmt subscriber
///
/// Filter comes from `RUST_LOG`, falling back to `release_blob_fetcher=info`.
/// Logs go to stderr so `resolve` output on stdout can be piped.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();
}
