//! Config resolution and index construction.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use manifold_core::ManifoldConfig;
use manifold_index::ManifestIndex;
use manifold_state::RedbStore;
use tracing::debug;

/// Read `config_path` if it exists, then apply the `--manifest` override.
///
/// Without a config file the manifest must come from the command line and
/// every other setting takes its default.
pub fn load(config_path: &Path, manifest: Option<&str>) -> Result<ManifoldConfig> {
    let mut config = if config_path.is_file() {
        ManifoldConfig::from_file(config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?
    } else {
        match manifest {
            Some(name) => ManifoldConfig::scaffold(name),
            None => bail!(
                "No config at {} and no --manifest given. Run `manifold init --manifest <name>` first.",
                config_path.display()
            ),
        }
    };
    if let Some(name) = manifest {
        config.manifest = name.to_string();
    }
    config.validate()?;
    debug!(manifest = %config.manifest, "config resolved");
    Ok(config)
}

/// Open the configured store and bind an index to the configured manifest.
///
/// Honors `store.in_memory`, which only the command tests rely on.
pub fn index_for(config: &ManifoldConfig) -> Result<ManifestIndex> {
    let store = if config.store.in_memory {
        RedbStore::open_in_memory()?
    } else {
        RedbStore::open(&config.store.path)
            .with_context(|| format!("Failed to open store at {}", config.store.path.display()))?
    };
    Ok(ManifestIndex::new(config.manifest.clone(), Arc::new(store))
        .with_tagger(Arc::new(config.tagger())))
}

/// Resolve config and open the index for one CLI invocation.
///
/// An in-memory store is refused: it starts empty in every process, so
/// nothing uploaded by one command would be visible to the next.
pub fn open(config_path: &Path, manifest: Option<&str>) -> Result<(ManifoldConfig, ManifestIndex)> {
    let config = load(config_path, manifest)?;
    if config.store.in_memory {
        bail!(
            "store.in_memory is set in {}, but an in-memory store does not persist between commands. \
             Remove it and set store.path instead.",
            config_path.display()
        );
    }
    let index = index_for(&config)?;
    Ok((config, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_without_manifest_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("manifold.toml"), None).is_err());
    }

    #[test]
    fn missing_config_with_manifest_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("manifold.toml"), Some("staging")).unwrap();
        assert_eq!(config.manifest, "staging");
        assert_eq!(config.manifest_size, 10);
    }

    #[test]
    fn flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifold.toml");
        std::fs::write(&path, "manifest = \"staging\"\nmanifest_size = 4\n").unwrap();

        let config = load(&path, Some("prod")).unwrap();
        assert_eq!(config.manifest, "prod");
        assert_eq!(config.manifest_size, 4);
    }

    #[test]
    fn empty_manifest_flag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("manifold.toml"), Some("")).is_err());
    }

    #[test]
    fn open_refuses_in_memory_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifold.toml");
        std::fs::write(&path, "manifest = \"staging\"\n\n[store]\nin_memory = true\n").unwrap();

        let err = open(&path, None).err().unwrap();
        assert!(err.to_string().contains("does not persist between commands"));
    }

    #[test]
    fn open_persists_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifold.toml");
        let store = dir.path().join("index.redb");
        std::fs::write(
            &path,
            format!("manifest = \"staging\"\n\n[store]\npath = {:?}\n", store.display().to_string()),
        )
        .unwrap();

        let rt = tokio::runtime::Runtime::new().unwrap();
        let key = {
            let (_, index) = open(&path, None).unwrap();
            rt.block_on(index.create_revision("<html/>")).unwrap()
        };
        let (_, index) = open(&path, None).unwrap();
        let list = rt.block_on(index.list_revisions()).unwrap();
        assert_eq!(list.revisions, vec![key]);
    }

    #[test]
    fn index_for_in_memory_store() {
        let mut config = ManifoldConfig::scaffold("staging");
        config.store.in_memory = true;

        let index = index_for(&config).unwrap();
        assert_eq!(index.manifest(), "staging");
    }
}
