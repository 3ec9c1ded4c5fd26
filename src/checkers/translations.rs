//! Translation catalog validation.
//!
//! Qt Linguist catalogs group messages by context, and lupdate names each
//! context after the C++ class the message was extracted from. After a class
//! rename the old context lingers in `data/locale/*.ts` and its messages are
//! never looked up again. Every context name must therefore still be a
//! declared class, unless it is foreign (Qt's own widgets show up here) or
//! namespace-qualified (the index is flat and cannot answer for those).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

use super::{CheckContext, Checker};
use crate::issues::{Issue, Rule};
use crate::project::{LOCALE_DIR, is_foreign_class};
use crate::utils::read_text_lossy;

/// Scope separator of qualified context names (`lmms::gui::Knob`).
const SCOPE_TOKEN: &str = "::";

pub struct TranslationChecker;

impl Checker for TranslationChecker {
    fn name(&self) -> &'static str {
        "translations"
    }

    fn caption(&self) -> &'static str {
        "Checking translation contexts against declared classes..."
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<Issue>> {
        let locale_dir = ctx.root.join(LOCALE_DIR);
        if !locale_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut candidates = BTreeSet::new();
        for catalog in catalog_files(&locale_dir)? {
            let text = read_text_lossy(&catalog)
                .with_context(|| format!("reading {}", catalog.display()))?;
            candidates.extend(context_names(&text));
        }

        // BTreeSet iteration keeps the reported names sorted.
        let issues = candidates
            .iter()
            .filter(|name| !is_foreign_class(name) && !name.contains(SCOPE_TOKEN))
            .filter(|name| !ctx.index.contains(name))
            .map(|name| {
                Issue::new(
                    Rule::UnknownTranslationClass,
                    LOCALE_DIR,
                    format!("class \"{name}\" does not exist"),
                )
            })
            .collect();
        Ok(issues)
    }
}

/// All `*.ts` catalogs under the locale directory, sorted.
fn catalog_files(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "ts"))
        .collect();
    files.sort();
    Ok(files)
}

/// Text content of every `<context><name>` element.
///
/// The reader stops quietly at the first malformed construct; names
/// collected up to that point are still checked. A broken catalog is
/// Linguist's problem, not a cross-reference error.
fn context_names(xml: &str) -> BTreeSet<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut names = BTreeSet::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Text(e)) => {
                if stack.last().map(String::as_str) == Some("name")
                    && stack.len() >= 2
                    && stack[stack.len() - 2] == "context"
                {
                    if let Ok(text) = e.unescape() {
                        let text = text.trim();
                        if !text.is_empty() {
                            names.insert(text.to_string());
                        }
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
    }
    names
}
