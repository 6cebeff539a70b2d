//! manifold-state: persistence for manifest revision records.
//!
//! Defines the [`RevisionStore`] contract the index is written against and
//! a [redb](https://docs.rs/redb) implementation of it.
//!
//! # Layout
//!
//! One table holds every manifest. Rows are keyed by the composite
//! `(manifest, key)` tuple, so all records of a manifest are contiguous and
//! a partition query is a single range scan. Values are JSON-serialized
//! [`StoredRecord`](manifold_core::StoredRecord)s.
//!
//! `RedbStore` is `Clone` + `Send` + `Sync` (backed by `Arc<Database>`) and
//! can be shared across async tasks.

pub mod adapter;
pub mod error;
pub mod store;
pub mod tables;

pub use adapter::{RevisionStore, StoreFuture};
pub use error::{StoreError, StoreResult};
pub use store::RedbStore;
