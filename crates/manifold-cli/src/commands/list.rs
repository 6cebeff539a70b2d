use manifold_index::ManifestIndex;

use crate::report;

pub async fn list(index: &ManifestIndex, limit: usize, format: &str) -> anyhow::Result<()> {
    let revisions = index.list_revisions().await?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&revisions)?);
        }
        _ => {
            println!("{}", report::revision_list(&revisions, limit));
        }
    }

    Ok(())
}
