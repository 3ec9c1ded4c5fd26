//! The run loop: enumerate, index, check, accumulate.

use std::path::Path;

use anyhow::Result;

use crate::checkers::{CheckContext, all_checkers};
use crate::enumerate::tracked_files;
use crate::index::ClassIndex;
use crate::issues::Issue;
use crate::project::ensure_repo_root;

/// One checker's share of the report.
#[derive(Debug)]
pub struct Section {
    pub caption: String,
    pub issues: Vec<Issue>,
}

/// Everything a full run produced.
#[derive(Debug)]
pub struct RunResult {
    pub scanned_files: usize,
    pub indexed_classes: usize,
    pub sections: Vec<Section>,
}

impl RunResult {
    /// The verdict is a pure fold over all accumulated issues.
    pub fn error_count(&self) -> usize {
        self.sections.iter().map(|s| s.issues.len()).sum()
    }
}

/// Run every checker against the repository at `root`.
///
/// Aborts with an error (rather than a populated result) on the two fatal
/// preconditions: a root that is not the LMMS tree, and a failing git
/// enumeration. Checkers run sequentially in a fixed order; each one's
/// issues are accumulated even when earlier checkers already failed the
/// run, so one pass reports every problem.
pub fn run(root: &Path) -> Result<RunResult> {
    ensure_repo_root(root)?;

    let files = tracked_files(root)?;
    let index = ClassIndex::build(root, &files);
    let ctx = CheckContext { root, index: &index };

    let mut sections = Vec::new();
    for checker in all_checkers() {
        sections.push(Section {
            caption: checker.caption().to_string(),
            issues: checker.check(&ctx)?,
        });
    }

    Ok(RunResult {
        scanned_files: files.len(),
        indexed_classes: index.len(),
        sections,
    })
}
