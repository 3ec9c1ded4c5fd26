//! Theme stylesheet validation.
//!
//! Theme authors select widgets by class name, namespaced in the Qt
//! stylesheet convention (`lmms--gui--Knob` for `lmms::gui::Knob`). A
//! selector without the namespace prefix silently matches nothing, and so
//! does a selector whose class was renamed. Both cases are reported here.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};

use super::css::{PreludeToken, parse_rules};
use super::{CheckContext, Checker};
use crate::index::ClassIndex;
use crate::issues::{Issue, Rule};
use crate::project::{SCOPE_SEPARATOR, STYLE_NAMESPACE_PREFIX, THEMES_DIR, is_foreign_class};
use crate::utils::read_text_lossy;

/// Stylesheet file name expected in every theme directory.
const STYLESHEET_NAME: &str = "style.css";

pub struct StylesheetChecker;

impl Checker for StylesheetChecker {
    fn name(&self) -> &'static str {
        "stylesheets"
    }

    fn caption(&self) -> &'static str {
        "Checking theme stylesheet selectors..."
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        for sheet in theme_stylesheets(&ctx.root.join(THEMES_DIR))? {
            let text =
                read_text_lossy(&sheet).with_context(|| format!("reading {}", sheet.display()))?;
            let location = sheet
                .strip_prefix(ctx.root)
                .unwrap_or(&sheet)
                .to_string_lossy()
                .into_owned();
            issues.extend(check_stylesheet(&text, &location, ctx.index)?);
        }
        Ok(issues)
    }
}

/// `style.css` of every theme subdirectory, sorted for deterministic output.
fn theme_stylesheets(themes_dir: &Path) -> Result<Vec<PathBuf>> {
    if !themes_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut sheets: Vec<PathBuf> = fs::read_dir(themes_dir)
        .with_context(|| format!("reading {}", themes_dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path().join(STYLESHEET_NAME))
        .filter(|p| p.is_file())
        .collect();
    sheets.sort();
    Ok(sheets)
}

fn check_stylesheet(css: &str, location: &str, index: &ClassIndex) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();
    let mut found = BTreeSet::new();

    for rule in parse_rules(css) {
        // At most one class-selector candidate per comma/whitespace
        // delimited group: `QScrollBar::handle` must not surface `handle`.
        let mut matched_in_group = false;
        for token in &rule.prelude {
            match token {
                PreludeToken::Ident(name) => {
                    if !matched_in_group {
                        matched_in_group = true;
                        if !is_foreign_class(name) {
                            check_selector(name, location, &mut found, &mut issues)?;
                        }
                    }
                }
                PreludeToken::Whitespace | PreludeToken::Comma => {
                    matched_in_group = false;
                }
                PreludeToken::Delim => {}
            }
        }
    }

    // BTreeSet iteration keeps the missing names sorted.
    issues.extend(
        found
            .iter()
            .filter(|name| !index.contains(name.as_str()))
            .map(|name| {
                Issue::new(
                    Rule::UnknownStylesheetClass,
                    location,
                    format!("class \"{name}\" does not exist"),
                )
            }),
    );
    Ok(issues)
}

/// Enforce the namespace convention on one selector candidate and record
/// its unscoped name for the index lookup.
fn check_selector(
    name: &str,
    location: &str,
    found: &mut BTreeSet<String>,
    issues: &mut Vec<Issue>,
) -> Result<()> {
    if !name.starts_with(STYLE_NAMESPACE_PREFIX) {
        issues.push(Issue::new(
            Rule::MissingNamespacePrefix,
            location,
            format!(
                "class \"{name}\" lacks the \"{STYLE_NAMESPACE_PREFIX}\" namespace prefix"
            ),
        ));
        return Ok(());
    }
    found.insert(unscope(name)?.to_string());
    Ok(())
}

/// Strip the namespace from a prefixed selector name by splitting on the
/// last scope separator: `lmms--gui--Knob` -> `Knob`.
///
/// A prefixed name always contains the separator; not finding one means the
/// scan itself went wrong, and that must surface instead of mis-splitting.
fn unscope(name: &str) -> Result<&str> {
    match name.rfind(SCOPE_SEPARATOR) {
        Some(at) => Ok(&name[at + SCOPE_SEPARATOR.len()..]),
        None => bail!("selector \"{name}\" carries the namespace prefix but has no scope separator"),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unscoping_takes_the_last_separator() {
        assert_eq!(unscope("lmms--gui--Knob").unwrap(), "Knob");
        assert_eq!(unscope("lmms--PeakController").unwrap(), "PeakController");
        assert_eq!(unscope("lmms--gui--").unwrap(), "");
    }

    #[test]
    fn missing_class_is_reported() {
        let index = ClassIndex::from_names(["Knob"]);
        let css = "lmms--gui--Knob { }\nlmms--gui--Foo { }\n";
        let issues = check_stylesheet(css, "data/themes/default/style.css", &index).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, Rule::UnknownStylesheetClass);
        assert_eq!(issues[0].message, "class \"Foo\" does not exist");
    }

    #[test]
    fn unprefixed_selector_is_reported() {
        let index = ClassIndex::from_names(["Bar"]);
        let issues = check_stylesheet("Bar { }", "style.css", &index).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, Rule::MissingNamespacePrefix);
        assert_eq!(
            issues[0].message,
            "class \"Bar\" lacks the \"lmms--\" namespace prefix"
        );
    }

    #[test]
    fn foreign_selectors_are_ignored() {
        let index = ClassIndex::default();
        let css = "QScrollBar::handle { }\nQPushButton:hover { }\n";
        assert!(check_stylesheet(css, "style.css", &index).unwrap().is_empty());
    }

    #[test]
    fn one_candidate_per_group() {
        let index = ClassIndex::from_names(["Knob", "Fader"]);
        // The descendant combinator starts a new group; the pseudo element
        // does not.
        let css = "lmms--gui--Knob lmms--gui--Fader::groove { }";
        assert!(check_stylesheet(css, "style.css", &index).unwrap().is_empty());

        let css = "lmms--gui--Knob lmms--gui--Gone { }";
        let issues = check_stylesheet(css, "style.css", &index).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "class \"Gone\" does not exist");
    }

    #[test]
    fn comma_groups_are_each_checked() {
        let index = ClassIndex::from_names(["Knob"]);
        let css = "lmms--gui--Knob, lmms--gui--Lost, QLabel { }";
        let issues = check_stylesheet(css, "style.css", &index).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "class \"Lost\" does not exist");
    }

    #[test]
    fn missing_classes_are_sorted() {
        let index = ClassIndex::default();
        let css = "lmms--Zeta { }\nlmms--Alpha { }\n";
        let issues = check_stylesheet(css, "style.css", &index).unwrap();
        let names: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "class \"Alpha\" does not exist",
                "class \"Zeta\" does not exist"
            ]
        );
    }

    #[test]
    fn checker_walks_every_theme_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for (theme, css) in [("default", "lmms--gui--Foo { }"), ("classic", "lmms--gui--Bar { }")] {
            let theme_dir = dir.path().join(THEMES_DIR).join(theme);
            fs::create_dir_all(&theme_dir).unwrap();
            fs::write(theme_dir.join(STYLESHEET_NAME), css).unwrap();
        }

        let index = ClassIndex::default();
        let ctx = CheckContext {
            root: dir.path(),
            index: &index,
        };
        let issues = StylesheetChecker.check(&ctx).unwrap();
        assert_eq!(issues.len(), 2);
        // classic sorts before default.
        assert_eq!(issues[0].location, "data/themes/classic/style.css");
        assert!(issues[0].message.contains("Bar"));
        assert_eq!(issues[1].location, "data/themes/default/style.css");
    }
}
