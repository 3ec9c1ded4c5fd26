//! Tracked-file enumeration.
//!
//! The class scan only covers files git knows about; build products and
//! editor droppings in the working tree must not contribute class names.
//! Two listings are taken: the primary project, and the nested frontend
//! sub-project which carries its own git dir.
//!
//! A failing `git ls-files` is fatal. Without a file list no validation
//! result is meaningful, so the error propagates out of the run instead of
//! joining the issue list.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};

use crate::project::{SUBPROJECT_DIRS, SUBPROJECT_SUBTREES, TEST_SUBTREE};

/// Extensions of files the Class Index Builder knows how to scan.
const SCAN_EXTENSIONS: &[&str] = &["cpp", "h", "ui"];

/// List every tracked file to scan for class declarations, relative to
/// `root`.
pub fn tracked_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = git_ls_files(root, &[])?
        .into_iter()
        .filter(|p| is_scannable(p) && !p.starts_with(TEST_SUBTREE))
        .map(PathBuf::from)
        .collect();

    if let Some(sub) = subproject_dir(root) {
        let git_dir = root.join(&sub).join(".git");
        let work_tree = root.join(&sub);
        let args = [
            "--git-dir".as_ref(),
            git_dir.as_os_str(),
            "--work-tree".as_ref(),
            work_tree.as_os_str(),
        ];
        let listed = git_ls_files(root, &args)
            .with_context(|| format!("listing files of the {sub} sub-project"))?;
        files.extend(
            listed
                .into_iter()
                .filter(|p| in_subproject_subtree(p) && is_scannable(p))
                .map(|p| Path::new(&sub).join(p)),
        );
    }

    Ok(files)
}

/// The nested sub-project directory, whichever variant exists on disk.
pub fn subproject_dir(root: &Path) -> Option<String> {
    SUBPROJECT_DIRS
        .iter()
        .find(|d| root.join(d).is_dir())
        .map(|d| d.to_string())
}

fn git_ls_files(root: &Path, global_args: &[&std::ffi::OsStr]) -> Result<Vec<String>> {
    let output = Command::new("git")
        .current_dir(root)
        .args(global_args)
        .arg("ls-files")
        .output()
        .context("failed to invoke git ls-files")?;

    if !output.status.success() {
        bail!(
            "git ls-files exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_owned)
        .collect())
}

fn is_scannable(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SCAN_EXTENSIONS.contains(&ext))
}

fn in_subproject_subtree(path: &str) -> bool {
    SUBPROJECT_SUBTREES.iter().any(|s| path.starts_with(s))
}
