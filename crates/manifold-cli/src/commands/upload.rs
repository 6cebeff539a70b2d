use std::path::Path;

use anyhow::{Context, bail};
use manifold_index::ManifestIndex;

use crate::report;

pub async fn upload(
    index: &ManifestIndex,
    file: Option<&Path>,
    payload: Option<&str>,
) -> anyhow::Result<()> {
    let payload = match (file, payload) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, Some(text)) => text.to_string(),
        (None, None) => bail!("Pass --file or --payload"),
    };

    match index.create_revision(&payload).await {
        Ok(key) => {
            println!("{}", report::upload_success(&key));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", report::upload_failure(&e));
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifold_core::ManifoldConfig;

    fn in_memory_index() -> ManifestIndex {
        let mut config = ManifoldConfig::scaffold("staging");
        config.store.in_memory = true;
        crate::settings::index_for(&config).unwrap()
    }

    #[tokio::test]
    async fn upload_from_file_then_reupload_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "<html>v1</html>").unwrap();
        let index = in_memory_index();

        upload(&index, Some(&path), None).await.unwrap();
        assert!(upload(&index, Some(&path), None).await.is_err());
        assert_eq!(index.list_revisions().await.unwrap().revisions.len(), 1);
    }

    #[tokio::test]
    async fn upload_inline_payload() {
        let index = in_memory_index();

        upload(&index, None, Some("build-A")).await.unwrap();
        assert_eq!(index.list_revisions().await.unwrap().revisions.len(), 1);
    }

    #[tokio::test]
    async fn upload_missing_file_fails() {
        let index = in_memory_index();
        let missing = Path::new("/nonexistent/manifold/index.html");

        assert!(upload(&index, Some(missing), None).await.is_err());
    }
}
