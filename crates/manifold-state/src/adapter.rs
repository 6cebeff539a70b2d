//! The store adapter contract consumed by the manifest index.
//!
//! Methods return boxed futures so the index can hold an
//! `Arc<dyn RevisionStore>` and swap backends (redb, test doubles) without
//! becoming generic. Retries and timeouts are the implementation's concern;
//! callers issue each request once.

use std::future::Future;
use std::pin::Pin;

use manifold_core::StoredRecord;

use crate::error::StoreResult;

/// Boxed future alias for store results.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = StoreResult<T>> + Send + 'a>>;

/// A partitioned key-value table of revision records.
///
/// Implementations must be safe for concurrent use by multiple in-flight
/// operations.
pub trait RevisionStore: Send + Sync {
    /// Fetch the record at `(manifest, key)`, if any.
    fn get<'a>(&'a self, manifest: &'a str, key: &'a str) -> StoreFuture<'a, Option<StoredRecord>>;

    /// Insert `record` only if nothing exists at its `(manifest, key)`.
    ///
    /// The check and the write must be atomic. On conflict this returns
    /// [`StoreError::AlreadyExists`](crate::StoreError::AlreadyExists) and
    /// leaves the existing record untouched.
    ///
    /// A stored revision's `created` must be strictly greater than that of
    /// every revision created before it in the same manifest; the index lists
    /// revisions in that order.
    fn create<'a>(&'a self, record: &'a StoredRecord) -> StoreFuture<'a, ()>;

    /// Insert or overwrite `record`.
    fn put<'a>(&'a self, record: &'a StoredRecord) -> StoreFuture<'a, ()>;

    /// Every record whose partition key is `manifest`.
    fn query<'a>(&'a self, manifest: &'a str) -> StoreFuture<'a, Vec<StoredRecord>>;
}
