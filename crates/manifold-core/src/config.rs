//! manifold.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::tag::{ContentDigest, MAX_DIGEST_LEN, MIN_DIGEST_LEN};

/// Default number of revisions shown by `list`.
pub const DEFAULT_MANIFEST_SIZE: usize = 10;

/// Default on-disk location of the revision table.
pub const DEFAULT_STORE_PATH: &str = ".manifold/index.redb";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("manifest name must not be empty")]
    EmptyManifest,
    #[error("manifest_size must be at least 1")]
    ZeroManifestSize,
    #[error("tagging.length must be between 7 and 64, got {0}")]
    DigestLength(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifoldConfig {
    /// Deployable unit the index operates on (e.g. an environment name).
    pub manifest: String,
    /// How many revisions `list` displays.
    #[serde(default = "default_manifest_size")]
    pub manifest_size: usize,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub tagging: TaggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Use an ephemeral in-memory table instead of `path`. For tests only:
    /// the table is empty in every new process, and the CLI refuses it.
    #[serde(default)]
    pub in_memory: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TaggingConfig {
    /// Truncate the content digest to this many hex characters.
    pub length: Option<usize>,
    /// Prefix revision keys with `<manifest>:`.
    #[serde(default)]
    pub prefix_manifest: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            in_memory: false,
        }
    }
}

fn default_manifest_size() -> usize {
    DEFAULT_MANIFEST_SIZE
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

impl ManifoldConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ManifoldConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Defaults for `manifest`, used when no manifold.toml exists.
    pub fn scaffold(manifest: &str) -> Self {
        ManifoldConfig {
            manifest: manifest.to_string(),
            manifest_size: DEFAULT_MANIFEST_SIZE,
            store: StoreConfig::default(),
            tagging: TaggingConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.manifest.trim().is_empty() {
            return Err(ConfigError::EmptyManifest);
        }
        if self.manifest_size == 0 {
            return Err(ConfigError::ZeroManifestSize);
        }
        if let Some(len) = self.tagging.length {
            if !(MIN_DIGEST_LEN..=MAX_DIGEST_LEN).contains(&len) {
                return Err(ConfigError::DigestLength(len));
            }
        }
        Ok(())
    }

    /// The tagging strategy described by `[tagging]`.
    pub fn tagger(&self) -> ContentDigest {
        let digest = ContentDigest::new().with_manifest_prefix(self.tagging.prefix_manifest);
        match self.tagging.length {
            Some(len) => digest.short(len),
            None => digest,
        }
    }
}
