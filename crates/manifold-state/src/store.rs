//! RedbStore: redb-backed revision table.
//!
//! All records live in one table keyed by `(manifest, key)`. Values are
//! JSON-serialized [`StoredRecord`]s. The store supports both on-disk and
//! in-memory backends (the latter for testing and throwaway runs).
//!
//! redb serializes write transactions, so the existence check in
//! [`RedbStore::create_record`] and its insert cannot interleave with
//! another writer. The same transaction advances a per-manifest clock, so
//! revision `created` stamps are strictly increasing in insertion order even
//! when several land in the same millisecond.

use std::path::Path;
use std::sync::Arc;

use manifold_core::StoredRecord;
use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::debug;

use crate::adapter::{RevisionStore, StoreFuture};
use crate::error::{StoreError, StoreResult};
use crate::tables::{CREATED_CLOCK, RECORDS};

/// Convert any `Display` error into a `StoreError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StoreError::$variant(e.to_string())
    };
}

/// Thread-safe revision store backed by redb.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open (or create) a persistent store at the given path.
    ///
    /// Missing parent directories are created.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(map_err!(Open))?;
        }
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "revision store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory revision store opened");
        Ok(store)
    }

    fn ensure_tables(&self) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(RECORDS).map_err(map_err!(Table))?;
        txn.open_table(CREATED_CLOCK).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    /// Fetch a single record.
    pub fn get_record(&self, manifest: &str, key: &str) -> StoreResult<Option<StoredRecord>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(RECORDS).map_err(map_err!(Table))?;
        match table.get((manifest, key)).map_err(map_err!(Read))? {
            Some(guard) => {
                let record: StoredRecord =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Insert a record unless its key is already taken.
    ///
    /// A revision whose `created` is not past the manifest's last stamp is
    /// stored with `last + 1` instead.
    pub fn create_record(&self, record: &StoredRecord) -> StoreResult<()> {
        let (manifest, key) = (record.manifest(), record.key());
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let created = {
            let mut table = txn.open_table(RECORDS).map_err(map_err!(Table))?;
            if table.get((manifest, key)).map_err(map_err!(Read))?.is_some() {
                None
            } else {
                let mut stamped = record.clone();
                if let StoredRecord::Revision(rev) = &mut stamped {
                    let mut clock = txn.open_table(CREATED_CLOCK).map_err(map_err!(Table))?;
                    let last = clock.get(manifest).map_err(map_err!(Read))?.map(|g| g.value());
                    if let Some(last) = last.filter(|last| rev.created <= *last) {
                        rev.created = last + 1;
                    }
                    clock.insert(manifest, rev.created).map_err(map_err!(Write))?;
                }
                let value = serde_json::to_vec(&stamped).map_err(map_err!(Serialize))?;
                table
                    .insert((manifest, key), value.as_slice())
                    .map_err(map_err!(Write))?;
                Some(stamped.created())
            }
        };
        let Some(created) = created else {
            txn.abort().map_err(map_err!(Transaction))?;
            debug!(%manifest, %key, "create rejected, key exists");
            return Err(StoreError::AlreadyExists {
                manifest: manifest.to_string(),
                key: key.to_string(),
            });
        };
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%manifest, %key, created, "record created");
        Ok(())
    }

    /// Insert or overwrite a record.
    pub fn put_record(&self, record: &StoredRecord) -> StoreResult<()> {
        let (manifest, key) = (record.manifest(), record.key());
        let value = serde_json::to_vec(record).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(RECORDS).map_err(map_err!(Table))?;
            table
                .insert((manifest, key), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%manifest, %key, "record stored");
        Ok(())
    }

    /// All records of one manifest, in key order.
    pub fn query_records(&self, manifest: &str) -> StoreResult<Vec<StoredRecord>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(RECORDS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.range((manifest, "")..).map_err(map_err!(Read))? {
            let (key, value) = entry.map_err(map_err!(Read))?;
            if key.value().0 != manifest {
                break;
            }
            let record: StoredRecord =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(record);
        }
        debug!(%manifest, count = results.len(), "records queried");
        Ok(results)
    }
}

impl RevisionStore for RedbStore {
    fn get<'a>(&'a self, manifest: &'a str, key: &'a str) -> StoreFuture<'a, Option<StoredRecord>> {
        Box::pin(async move { self.get_record(manifest, key) })
    }

    fn create<'a>(&'a self, record: &'a StoredRecord) -> StoreFuture<'a, ()> {
        Box::pin(async move { self.create_record(record) })
    }

    fn put<'a>(&'a self, record: &'a StoredRecord) -> StoreFuture<'a, ()> {
        Box::pin(async move { self.put_record(record) })
    }

    fn query<'a>(&'a self, manifest: &'a str) -> StoreFuture<'a, Vec<StoredRecord>> {
        Box::pin(async move { self.query_records(manifest) })
    }
}
