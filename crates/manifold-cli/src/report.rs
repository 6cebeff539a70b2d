//! Human-readable command output.

use manifold_core::PointerRecord;
use manifold_index::{ActivationReport, IndexError, RevisionList};

pub fn upload_success(revision: &str) -> String {
    format!("\nUpload successful!\n\nUploaded revision: {revision}\n")
}

pub fn upload_failure(err: &IndexError) -> String {
    match err {
        IndexError::DuplicateRevision { key, .. } => format!(
            "\nUpload failed!\n\n\
             Revision {key} already exists.\n\
             Did you try to upload an already uploaded revision?\n\n\
             Please run `manifold list` to investigate.\n"
        ),
        other => format!("\nUpload failed!\n\n{other}\n"),
    }
}

/// The `limit` newest revisions, newest first, with `=>` marking current.
pub fn revision_list(list: &RevisionList, limit: usize) -> String {
    let mut out = format!("\nLast {limit} uploaded revisions:\n\n");
    if list.revisions.is_empty() {
        out.push_str("|    (none)\n");
    }
    for key in list.latest(limit).iter().rev() {
        let prefix = if list.is_current(key) { "| => " } else { "|    " };
        out.push_str(&format!("{prefix}{key}\n"));
    }
    out.push_str("\n# => - current revision\n");
    out
}

pub fn activation_success(report: &ActivationReport) -> String {
    format!(
        "\nActivation successful!\n\n\
         Revision {} is now current for {}.\n\
         Please run `manifold list` to see what revision is current.\n",
        report.revision, report.manifest
    )
}

pub fn activation_failure(err: &IndexError) -> String {
    match err {
        IndexError::InvalidArgument(_) => format!(
            "\nError! Please pass a revision to `manifold activate`.\n\n{}",
            revision_suggestion()
        ),
        IndexError::RevisionNotFound { .. } => format!(
            "\nError! Passed revision could not be found in manifest!\n\n{}",
            revision_suggestion()
        ),
        other => format!("\nActivation failed!\n\n{other}\n"),
    }
}

pub fn current(manifest: &str, pointer: Option<&PointerRecord>) -> String {
    match pointer {
        Some(p) => format!(
            "\nCurrent revision of {manifest}: {}\n\nIndex:\n\n{}\n",
            p.target, p.index
        ),
        None => format!("\nNo revision of {manifest} has been activated yet.\n"),
    }
}

fn revision_suggestion() -> &'static str {
    "Try to run `manifold list` and pass a revision listed there to `manifold activate`.\n\n\
     Example:\n\n\
     manifold activate --revision <revision>\n"
}
