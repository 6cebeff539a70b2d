//! manifold-index: the revision index and activation protocol.
//!
//! A [`ManifestIndex`] is bound to one manifest and one store for its
//! lifetime. It:
//!
//! - Creates immutable revisions keyed by a tagging strategy, refusing
//!   duplicates atomically
//! - Lists a manifest's revisions and which one is current
//! - Activates a revision by rewriting the manifest's pointer record
//!
//! # Architecture
//!
//! ```text
//! ManifestIndex
//!   ├── manifest name (fixed at construction)
//!   ├── Arc<dyn RevisionStore> (get / create / put / query)
//!   └── Arc<dyn TaggingStrategy> (payload → revision key)
//! ```
//!
//! Per manifest the pointer moves `NO_CURRENT → ACTIVE(r1) → ACTIVE(r2) …`;
//! nothing here removes a revision.

pub mod error;
pub mod index;

pub use error::{IndexError, IndexResult};
pub use index::{ActivationReport, ManifestIndex, RevisionList};
