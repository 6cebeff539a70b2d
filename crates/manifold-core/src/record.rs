//! Revision records stored in the manifest table.
//!
//! Every record is addressed by `(manifest, key)`. Two shapes share the
//! table:
//!
//! - [`RevisionRecord`]: one immutable entry per uploaded revision.
//! - [`PointerRecord`]: one mutable entry per manifest, keyed by
//!   [`pointer_key`], naming the revision that is currently live.
//!
//! Both are persisted through [`StoredRecord`] so a store can hold them in a
//! single partitioned table.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Suffix appended to the manifest name to form the pointer key.
pub const POINTER_SUFFIX: &str = ":current";

/// Key of the current-pointer record for `manifest`.
pub fn pointer_key(manifest: &str) -> String {
    format!("{manifest}{POINTER_SUFFIX}")
}

/// Whether `key` is the reserved pointer key of `manifest`.
pub fn is_pointer_key(manifest: &str, key: &str) -> bool {
    key.strip_prefix(manifest) == Some(POINTER_SUFFIX)
}

/// Milliseconds since the Unix epoch.
pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

// ── Revision ───────────────────────────────────────────────────────

/// An uploaded revision. Written once, never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevisionRecord {
    /// Partition key: the deployable unit this revision belongs to.
    pub manifest: String,
    /// Sort key: the tag derived from the payload.
    pub key: String,
    /// Unix timestamp (milliseconds) when the revision was written.
    pub created: u64,
    /// Serialized artifact description. Opaque to the index.
    pub index: String,
}

impl RevisionRecord {
    pub fn new(manifest: &str, key: &str, index: &str, created: u64) -> Self {
        Self {
            manifest: manifest.to_string(),
            key: key.to_string(),
            created,
            index: index.to_string(),
        }
    }
}

// ── Pointer ────────────────────────────────────────────────────────

/// The per-manifest "current" record.
///
/// `index` is copied from the referenced revision so a reader of the
/// pointer learns the active artifact set without a second lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointerRecord {
    pub manifest: String,
    /// Always `pointer_key(manifest)`.
    pub key: String,
    /// Unix timestamp (milliseconds) of the activation that wrote this record.
    pub created: u64,
    pub index: String,
    /// Key of the revision this pointer selects.
    #[serde(rename = "ref")]
    pub target: String,
}

impl PointerRecord {
    /// Build the pointer that makes `revision` current for its manifest.
    pub fn activate(revision: &RevisionRecord, created: u64) -> Self {
        Self {
            manifest: revision.manifest.clone(),
            key: pointer_key(&revision.manifest),
            created,
            index: revision.index.clone(),
            target: revision.key.clone(),
        }
    }
}

// ── Stored form ────────────────────────────────────────────────────

/// A row of the manifest table, tagged by shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredRecord {
    Revision(RevisionRecord),
    Pointer(PointerRecord),
}

impl StoredRecord {
    pub fn manifest(&self) -> &str {
        match self {
            StoredRecord::Revision(r) => &r.manifest,
            StoredRecord::Pointer(p) => &p.manifest,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            StoredRecord::Revision(r) => &r.key,
            StoredRecord::Pointer(p) => &p.key,
        }
    }

    pub fn created(&self) -> u64 {
        match self {
            StoredRecord::Revision(r) => r.created,
            StoredRecord::Pointer(p) => p.created,
        }
    }

    pub fn index(&self) -> &str {
        match self {
            StoredRecord::Revision(r) => &r.index,
            StoredRecord::Pointer(p) => &p.index,
        }
    }

    pub fn into_revision(self) -> Option<RevisionRecord> {
        match self {
            StoredRecord::Revision(r) => Some(r),
            StoredRecord::Pointer(_) => None,
        }
    }

    pub fn into_pointer(self) -> Option<PointerRecord> {
        match self {
            StoredRecord::Pointer(p) => Some(p),
            StoredRecord::Revision(_) => None,
        }
    }
}

impl From<RevisionRecord> for StoredRecord {
    fn from(record: RevisionRecord) -> Self {
        StoredRecord::Revision(record)
    }
}

impl From<PointerRecord> for StoredRecord {
    fn from(record: PointerRecord) -> Self {
        StoredRecord::Pointer(record)
    }
}
