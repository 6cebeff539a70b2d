//! ManifestIndex: create, list, and activate revisions of one manifest.
//!
//! Every operation is a short linear sequence of store requests. The index
//! holds no locks of its own; ordering between concurrent callers is
//! whatever the store provides. Revision creation relies on the store's
//! atomic create-if-absent, and activation is a plain overwrite of the
//! pointer record so that repeating it is harmless.

use std::sync::Arc;

use manifold_core::{
    ContentDigest, PointerRecord, RevisionRecord, StoredRecord, TaggingStrategy, epoch_millis,
    is_pointer_key, pointer_key,
};
use manifold_state::{RevisionStore, StoreError};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{IndexError, IndexResult};

/// Revisions of a manifest and the one currently selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RevisionList {
    /// Revision keys, oldest first (in creation order).
    pub revisions: Vec<String>,
    /// Key the pointer record refers to, if the manifest was ever activated.
    pub current: Option<String>,
}

impl RevisionList {
    /// The `n` most recently created revisions, oldest first.
    pub fn latest(&self, n: usize) -> &[String] {
        let start = self.revisions.len().saturating_sub(n);
        &self.revisions[start..]
    }

    pub fn is_current(&self, key: &str) -> bool {
        self.current.as_deref() == Some(key)
    }
}

/// Outcome of a successful activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivationReport {
    pub manifest: String,
    /// The revision that is now current.
    pub revision: String,
    /// Unix timestamp (milliseconds) written to the pointer record.
    pub activated_at: u64,
}

/// Revision index for a single manifest.
pub struct ManifestIndex {
    manifest: String,
    store: Arc<dyn RevisionStore>,
    tagger: Arc<dyn TaggingStrategy>,
}

impl ManifestIndex {
    /// Create an index over `manifest`, tagging revisions by SHA-256 digest.
    pub fn new(manifest: impl Into<String>, store: Arc<dyn RevisionStore>) -> Self {
        Self {
            manifest: manifest.into(),
            store,
            tagger: Arc::new(ContentDigest::new()),
        }
    }

    /// Replace the tagging strategy.
    pub fn with_tagger(mut self, tagger: Arc<dyn TaggingStrategy>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn manifest(&self) -> &str {
        &self.manifest
    }

    /// Store `payload` as a new revision and return its key.
    ///
    /// Fails with [`IndexError::DuplicateRevision`] when the derived key is
    /// already present; the existing record is left untouched.
    pub async fn create_revision(&self, payload: &str) -> IndexResult<String> {
        let key = self.tagger.create_tag(&self.manifest, payload);
        if key.trim().is_empty() || is_pointer_key(&self.manifest, &key) {
            return Err(IndexError::InvalidArgument(format!(
                "tagging strategy produced unusable revision key {key:?}"
            )));
        }

        let record = StoredRecord::from(RevisionRecord::new(
            &self.manifest,
            &key,
            payload,
            epoch_millis(),
        ));
        match self.store.create(&record).await {
            Ok(()) => {
                info!(manifest = %self.manifest, %key, "revision created");
                Ok(key)
            }
            Err(StoreError::AlreadyExists { .. }) => {
                warn!(manifest = %self.manifest, %key, "revision already exists");
                Err(IndexError::DuplicateRevision {
                    manifest: self.manifest.clone(),
                    key,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All revisions of the manifest plus the current pointer target.
    ///
    /// An empty manifest yields an empty list with no current revision.
    pub async fn list_revisions(&self) -> IndexResult<RevisionList> {
        let records = self.store.query(&self.manifest).await?;

        let mut current = None;
        let mut revisions = Vec::with_capacity(records.len());
        for record in records {
            match record {
                StoredRecord::Pointer(p) if is_pointer_key(&self.manifest, &p.key) => {
                    current = Some(p.target);
                }
                StoredRecord::Revision(r) if !is_pointer_key(&self.manifest, &r.key) => {
                    revisions.push(r);
                }
                other => {
                    debug!(manifest = %self.manifest, key = other.key(), "skipping malformed record");
                }
            }
        }
        // The store stamps revisions with strictly increasing `created`
        // values per manifest; the key only orders records it did not stamp.
        revisions.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.key.cmp(&b.key)));

        Ok(RevisionList {
            revisions: revisions.into_iter().map(|r| r.key).collect(),
            current,
        })
    }

    /// Point the manifest's current record at `revision_key`.
    ///
    /// A blank key is rejected before the store is contacted. Any other key
    /// is looked up exactly as given, surrounding whitespace included. A missing
    /// revision, a failed lookup, and a failed pointer write all surface as
    /// [`IndexError::RevisionNotFound`]; a prior pointer is left unchanged in
    /// each case.
    pub async fn activate_revision(&self, revision_key: &str) -> IndexResult<ActivationReport> {
        if revision_key.trim().is_empty() {
            return Err(IndexError::InvalidArgument("no revision specified".to_string()));
        }

        let not_found = |source: Option<StoreError>| IndexError::RevisionNotFound {
            manifest: self.manifest.clone(),
            key: revision_key.to_string(),
            source,
        };

        let revision = match self.store.get(&self.manifest, revision_key).await {
            Ok(Some(StoredRecord::Revision(r))) => r,
            Ok(_) => {
                warn!(manifest = %self.manifest, key = %revision_key, "no such revision");
                return Err(not_found(None));
            }
            Err(e) => {
                warn!(manifest = %self.manifest, key = %revision_key, error = %e, "revision lookup failed");
                return Err(not_found(Some(e)));
            }
        };

        let activated_at = epoch_millis();
        let pointer = StoredRecord::from(PointerRecord::activate(&revision, activated_at));
        if let Err(e) = self.store.put(&pointer).await {
            warn!(manifest = %self.manifest, key = %revision_key, error = %e, "pointer write failed");
            return Err(not_found(Some(e)));
        }

        info!(manifest = %self.manifest, revision = %revision.key, "revision activated");
        Ok(ActivationReport {
            manifest: self.manifest.clone(),
            revision: revision.key,
            activated_at,
        })
    }

    /// The pointer record, carrying the active revision's key and index.
    pub async fn current(&self) -> IndexResult<Option<PointerRecord>> {
        let key = pointer_key(&self.manifest);
        let record = self.store.get(&self.manifest, &key).await?;
        Ok(record.and_then(StoredRecord::into_pointer))
    }
}
