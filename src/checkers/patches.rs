//! Vendored patch validation.
//!
//! Several plugins carry patch files that are applied to vendored sources at
//! build time. The diff headers inside them name files under `plugins/`;
//! when a vendored tree is upgraded or relocated, those paths go stale and
//! the patch no longer applies. Every referenced path must exist in the
//! working tree, with two documented deviations:
//!
//! - references into the vendored zynaddsubfx tree are not checked, its
//!   nested generated modules make existence undecidable before a build;
//! - references into the swh ladspa directory are rewritten to the `.xml`
//!   descriptor, the `.c` sources there only exist after generation.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context as _, Result};
use glob::glob;
use regex::Regex;

use super::{CheckContext, Checker};
use crate::issues::{Issue, Rule};
use crate::project::{
    GENERATED_DESCRIPTOR_EXT, GENERATED_EFFECTS_DIR, PATCH_GLOB, VENDOR_EXCEPTION_PREFIX,
};
use crate::utils::read_text_lossy;

/// Path fragments following a `/` in diff headers, e.g. the
/// `plugins/...` part of `--- a/plugins/LadspaEffect/swh/foo.c`.
static PATCH_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)/(plugins/\S+)").unwrap());

pub struct PatchChecker;

impl Checker for PatchChecker {
    fn name(&self) -> &'static str {
        "patches"
    }

    fn caption(&self) -> &'static str {
        "Checking file paths referenced by patches..."
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        for patch in patch_files(ctx.root)? {
            let text =
                read_text_lossy(&patch).with_context(|| format!("reading {}", patch.display()))?;
            let location = patch
                .strip_prefix(ctx.root)
                .unwrap_or(&patch)
                .to_string_lossy()
                .into_owned();

            // BTreeSet: unique paths, reported in sorted order.
            for referenced in referenced_paths(&text) {
                let expected = expected_path(Path::new(&referenced));
                if !ctx.root.join(&expected).exists() {
                    issues.push(Issue::new(
                        Rule::MissingPatchTarget,
                        location.clone(),
                        format!("referenced file \"{}\" does not exist", expected.display()),
                    ));
                }
            }
        }
        Ok(issues)
    }
}

/// All patch files matching the conventional glob, sorted.
fn patch_files(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = root.join(PATCH_GLOB);
    let pattern = pattern.to_str().context("repository root is not UTF-8")?;
    let mut files: Vec<PathBuf> = glob(pattern)
        .context("invalid patch glob")?
        .filter_map(|e| e.ok())
        .collect();
    files.sort();
    Ok(files)
}

/// Unique `plugins/` paths referenced by one patch, minus the vendored
/// exception subtree.
fn referenced_paths(text: &str) -> BTreeSet<String> {
    PATCH_PATH_REGEX
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .filter(|p| !p.starts_with(VENDOR_EXCEPTION_PREFIX))
        .collect()
}

/// The path whose existence proves the reference valid. Native sources of
/// the generated swh effects are replaced by their XML descriptor.
fn expected_path(referenced: &Path) -> PathBuf {
    if referenced.parent() == Some(Path::new(GENERATED_EFFECTS_DIR)) {
        referenced.with_extension(GENERATED_DESCRIPTOR_EXT)
    } else {
        referenced.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::index::ClassIndex;

    const PATCH: &str = "\
diff --git a/plugins/LadspaEffect/swh/foo_1234.c b/plugins/LadspaEffect/swh/foo_1234.c
--- a/plugins/LadspaEffect/swh/foo_1234.c
+++ b/plugins/LadspaEffect/swh/foo_1234.c
@@ -1,3 +1,3 @@
-old
+new
";

    #[test]
    fn paths_are_extracted_unique_and_sorted() {
        let text = "\
--- a/plugins/B/b.cpp
+++ b/plugins/B/b.cpp
--- a/plugins/A/a.cpp
+++ b/plugins/A/a.cpp
";
        let paths: Vec<String> = referenced_paths(text).into_iter().collect();
        assert_eq!(paths, vec!["plugins/A/a.cpp", "plugins/B/b.cpp"]);
    }

    #[test]
    fn vendor_exception_is_not_checked() {
        let text = "--- a/plugins/ZynAddSubFx/zynaddsubfx/src/Misc/Util.cpp\n";
        assert!(referenced_paths(text).is_empty());
    }

    #[test]
    fn generated_effects_expect_the_descriptor() {
        assert_eq!(
            expected_path(Path::new("plugins/LadspaEffect/swh/ladspa/amp_1181.c")),
            Path::new("plugins/LadspaEffect/swh/ladspa/amp_1181.xml")
        );
        // Anywhere else the literal path is expected.
        assert_eq!(
            expected_path(Path::new("plugins/LadspaEffect/swh/foo_1234.c")),
            Path::new("plugins/LadspaEffect/swh/foo_1234.c")
        );
    }

    #[test]
    fn missing_and_present_targets() {
        let dir = tempfile::tempdir().unwrap();
        let patches_dir = dir.path().join("plugins/patches");
        fs::create_dir_all(&patches_dir).unwrap();
        fs::write(patches_dir.join("swh.patch"), PATCH).unwrap();

        let index = ClassIndex::default();
        let ctx = CheckContext {
            root: dir.path(),
            index: &index,
        };

        // Target absent: one issue, tagged with the patch file.
        let issues = PatchChecker.check(&ctx).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, Rule::MissingPatchTarget);
        assert_eq!(issues[0].location, "plugins/patches/swh.patch");
        assert!(
            issues[0]
                .message
                .contains("plugins/LadspaEffect/swh/foo_1234.c")
        );

        // Create the target: clean run.
        fs::create_dir_all(dir.path().join("plugins/LadspaEffect/swh")).unwrap();
        fs::write(
            dir.path().join("plugins/LadspaEffect/swh/foo_1234.c"),
            "/* vendored */\n",
        )
        .unwrap();
        assert!(PatchChecker.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn descriptor_rewrite_satisfies_the_check() {
        let dir = tempfile::tempdir().unwrap();
        let patches_dir = dir.path().join("plugins/patches");
        fs::create_dir_all(&patches_dir).unwrap();
        fs::write(
            patches_dir.join("ladspa.patch"),
            "--- a/plugins/LadspaEffect/swh/ladspa/amp_1181.c\n",
        )
        .unwrap();

        // Only the descriptor exists before a build.
        let ladspa_dir = dir.path().join("plugins/LadspaEffect/swh/ladspa");
        fs::create_dir_all(&ladspa_dir).unwrap();
        fs::write(ladspa_dir.join("amp_1181.xml"), "<ladspa/>\n").unwrap();

        let index = ClassIndex::default();
        let ctx = CheckContext {
            root: dir.path(),
            index: &index,
        };
        assert!(PatchChecker.check(&ctx).unwrap().is_empty());
    }
}
