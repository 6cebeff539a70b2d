//! redb table definitions for the revision store.

use redb::TableDefinition;

/// Revision and pointer records keyed by `(manifest, key)`.
pub const RECORDS: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("records");

/// Highest `created` stamp handed out per manifest.
pub const CREATED_CLOCK: TableDefinition<&str, u64> = TableDefinition::new("created_clock");
