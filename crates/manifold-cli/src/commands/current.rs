use manifold_index::ManifestIndex;

use crate::report;

pub async fn current(index: &ManifestIndex, format: &str) -> anyhow::Result<()> {
    let pointer = index.current().await?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&pointer)?);
        }
        _ => {
            println!("{}", report::current(index.manifest(), pointer.as_ref()));
        }
    }

    Ok(())
}
