//! The four cross-reference validators.
//!
//! Each checker is a pure function of the repository tree and the Class
//! Index: it returns the issues it found and never mutates shared state.
//! The run loop executes them in a fixed order and accumulates the results,
//! so the final verdict is a fold over all returned issues.
//!
//! ## Module Structure
//!
//! - `submodules`: declared submodule paths must be existing directories
//! - `translations`: catalog context names must be declared classes
//! - `stylesheets`: theme selectors must be namespaced, declared classes
//! - `patches`: patch-referenced `plugins/` paths must exist on disk
//! - `css`: minimal stylesheet tokenizer used by `stylesheets`

pub mod css;
pub mod patches;
pub mod stylesheets;
pub mod submodules;
pub mod translations;

use std::path::Path;

use anyhow::Result;

use crate::index::ClassIndex;
use crate::issues::Issue;

/// Shared read-only inputs of every checker.
pub struct CheckContext<'a> {
    /// Repository root all conventional paths are resolved against.
    pub root: &'a Path,
    /// The authoritative class name set.
    pub index: &'a ClassIndex,
}

/// One validator category.
pub trait Checker {
    /// Short identifier, used in verbose output.
    fn name(&self) -> &'static str;

    /// Caption line printed above this checker's section of the report.
    fn caption(&self) -> &'static str;

    fn check(&self, ctx: &CheckContext) -> Result<Vec<Issue>>;
}

/// All checkers in their fixed execution order.
pub fn all_checkers() -> Vec<Box<dyn Checker>> {
    vec![
        Box::new(submodules::SubmoduleChecker),
        Box::new(translations::TranslationChecker),
        Box::new(stylesheets::StylesheetChecker),
        Box::new(patches::PatchChecker),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checker_order_is_fixed() {
        let names: Vec<&str> = all_checkers().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec!["submodules", "translations", "stylesheets", "patches"]
        );
    }
}
