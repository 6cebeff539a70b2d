//! Manifest index error types.

use manifold_state::StoreError;
use thiserror::Error;

/// Errors returned by [`ManifestIndex`](crate::ManifestIndex) operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Missing or malformed caller input. Raised before any store access.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("revision already exists: {manifest}/{key}")]
    DuplicateRevision { manifest: String, key: String },

    /// Activation could not complete: the revision is absent, or the
    /// lookup or pointer write failed. A store failure is kept as `source`.
    #[error("revision not found: {manifest}/{key}")]
    RevisionNotFound {
        manifest: String,
        key: String,
        #[source]
        source: Option<StoreError>,
    },

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

pub type IndexResult<T> = Result<T, IndexError>;
