//! Submodule path validation.
//!
//! `.gitmodules` declares where each submodule is mounted; a stale entry
//! (say, after a plugin was moved) still lets most git operations succeed
//! but breaks fresh clones. Every declared path must be an existing
//! directory in the working tree.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use super::{CheckContext, Checker};
use crate::issues::{Issue, Rule};
use crate::project::GITMODULES;
use crate::utils::read_text_lossy;

static SUBMODULE_SECTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\[submodule "([^"]+)"\]$"#).unwrap());

pub struct SubmoduleChecker;

impl Checker for SubmoduleChecker {
    fn name(&self) -> &'static str {
        "submodules"
    }

    fn caption(&self) -> &'static str {
        "Checking declared submodule paths..."
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<Issue>> {
        let manifest = ctx.root.join(GITMODULES);
        if !manifest.is_file() {
            return Ok(Vec::new());
        }
        let text = read_text_lossy(&manifest)?;

        let mut issues = Vec::new();
        for path in declared_paths(&text) {
            if !ctx.root.join(path).is_dir() {
                issues.push(Issue::new(
                    Rule::MissingSubmodule,
                    GITMODULES,
                    format!("submodule path \"{path}\" is not an existing directory"),
                ));
            }
        }
        Ok(issues)
    }
}

/// Paths of all `[submodule "<path>"]` section headers, in file order.
fn declared_paths(text: &str) -> impl Iterator<Item = &str> {
    SUBMODULE_SECTION_REGEX
        .captures_iter(text)
        .map(|c| c.get(1).unwrap().as_str())
}
