//! # Release Directory
//!
//! Locates the release configuration and reads its YAML documents.
//! Documents are read fresh on every call; nothing is cached.

use crate::constants::{BLOBS_CONFIG_PATH, FINAL_CONFIG_PATH, RELEASE_PATH_ENV};
use crate::error::FetchError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Root of a release checkout containing `config/blobs.yml` and `config/final.yml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    root: PathBuf,
}

impl ReleaseConfig {
    /// Use an explicit release directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the release directory from `RELEASE_PATH`
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ReleasePathNotSet`] when the variable is unset or empty.
    pub fn from_env() -> Result<Self, FetchError> {
        match std::env::var_os(RELEASE_PATH_ENV) {
            Some(root) if !root.is_empty() => Ok(Self::new(root)),
            _ => Err(FetchError::ReleasePathNotSet {
                env_var: RELEASE_PATH_ENV,
            }),
        }
    }

    /// Prefer an explicit path, fall back to `RELEASE_PATH`
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ReleasePathNotSet`] when neither is available.
    pub fn from_arg_or_env(root: Option<PathBuf>) -> Result<Self, FetchError> {
        root.map_or_else(Self::from_env, |root| Ok(Self::new(root)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blobs_path(&self) -> PathBuf {
        self.root.join(BLOBS_CONFIG_PATH)
    }

    pub fn final_config_path(&self) -> PathBuf {
        self.root.join(FINAL_CONFIG_PATH)
    }
}

/// Read and deserialize a YAML document
pub(crate) fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, FetchError> {
    debug!("Reading release config {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|source| FetchError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| FetchError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
