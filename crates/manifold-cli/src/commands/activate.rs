use manifold_index::ManifestIndex;

use crate::report;

pub async fn activate(index: &ManifestIndex, revision: Option<&str>) -> anyhow::Result<()> {
    match index.activate_revision(revision.unwrap_or_default()).await {
        Ok(activation) => {
            println!("{}", report::activation_success(&activation));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", report::activation_failure(&e));
            Err(e.into())
        }
    }
}
