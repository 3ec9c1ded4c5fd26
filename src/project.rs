//! Repository layout conventions.
//!
//! Every path and literal the checkers rely on is a fixed convention of the
//! LMMS source tree; none of it is configurable. Collecting the conventions
//! here keeps the validators free of magic strings and gives the fragile ones
//! (notably [`is_foreign_class`]) a single place to be replaced.

use std::path::Path;

use anyhow::{Result, bail};

/// File whose presence proves we were started from the repository root.
pub const REPO_MARKER: &str = "CMakeLists.txt";

/// Directory that distinguishes the LMMS tree from any other CMake project.
pub const THEMES_DIR: &str = "data/themes";

/// Directory holding the Qt Linguist translation catalogs (`*.ts`).
pub const LOCALE_DIR: &str = "data/locale";

/// Submodule registration manifest.
pub const GITMODULES: &str = ".gitmodules";

/// Glob matching vendored patch files, relative to the repository root.
pub const PATCH_GLOB: &str = "*/patches/*.patch";

/// Subtree prefix of paths a patch file may reference.
pub const PLUGIN_PREFIX: &str = "plugins/";

/// Required namespace prefix on stylesheet class selectors.
pub const STYLE_NAMESPACE_PREFIX: &str = "lmms--";

/// Scope separator inside namespaced selector names.
pub const SCOPE_SEPARATOR: &str = "--";

/// Subtree of the primary project that is never scanned for classes.
pub const TEST_SUBTREE: &str = "tests/";

/// Candidate directory names for the nested frontend sub-project, tried in
/// order; the first one that exists on disk wins.
pub const SUBPROJECT_DIRS: &[&str] = &["gui", "frontend"];

/// Subtrees of the sub-project that contribute to the class scan.
pub const SUBPROJECT_SUBTREES: &[&str] = &["forms/", "src/"];

/// Directory whose native sources are generated from XML descriptors at build
/// time. Patch references into it are rewritten to the descriptor before the
/// existence check.
pub const GENERATED_EFFECTS_DIR: &str = "plugins/LadspaEffect/swh/ladspa";

/// Extension of the descriptors the generated effects are built from.
pub const GENERATED_DESCRIPTOR_EXT: &str = "xml";

/// Vendored subtree with nested generated modules; patch references into it
/// are deliberately not checked.
pub const VENDOR_EXCEPTION_PREFIX: &str = "plugins/ZynAddSubFx/zynaddsubfx/";

/// Fail fast unless `root` looks like the LMMS repository root.
///
/// Both the top-level `CMakeLists.txt` and the themes directory must be
/// present; either alone would match too many other trees.
pub fn ensure_repo_root(root: &Path) -> Result<()> {
    if !root.join(REPO_MARKER).is_file() || !root.join(THEMES_DIR).is_dir() {
        bail!(
            "{} or {} not found; run from the root of the LMMS source tree",
            REPO_MARKER,
            THEMES_DIR
        );
    }
    Ok(())
}

/// Heuristic for identifiers that belong to an external toolkit rather than
/// this project's own source: anything starting with `Q` is assumed to be a
/// Qt class and is never checked against the Class Index.
///
/// The rule is deliberately blunt (a project class named `Quantizer` would be
/// skipped too) but matches what the tree relies on today. Swap this
/// predicate for an explicit allow list if that ever bites.
pub fn is_foreign_class(name: &str) -> bool {
    name.starts_with('Q')
}
