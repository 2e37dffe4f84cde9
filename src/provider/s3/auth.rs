//! # S3 Authentication
//!
//! Builds the AWS SDK config from the static credentials in `config/final.yml`.
//! The default credential chain is never consulted.

use crate::config::{BlobstoreOptions, FetchSettings};
use crate::constants::CREDENTIALS_PROVIDER_NAME;
use aws_config::SdkConfig;
use aws_credential_types::Credentials;
use tracing::info;

/// Static credentials for the blobstore bucket
pub fn static_credentials(options: &BlobstoreOptions) -> Credentials {
    Credentials::new(
        options.access_key_id.clone(),
        options.secret_access_key.clone(),
        None,
        None,
        CREDENTIALS_PROVIDER_NAME,
    )
}

/// Create AWS SDK config with static credentials and a fixed region
pub async fn create_sdk_config(options: &BlobstoreOptions, settings: &FetchSettings) -> SdkConfig {
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(settings.region.clone()))
        .credentials_provider(static_credentials(options));

    // S3-compatible stores (MinIO, local mocks) are reached through an explicit endpoint
    if let Some(endpoint) = &settings.endpoint_url {
        info!("Routing blobstore requests to {}", endpoint);
        builder = builder.endpoint_url(endpoint);
    }

    builder.load().await
}
