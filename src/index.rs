//! Class Index construction.
//!
//! The index is the single oracle every checker consults: the set of class
//! names declared anywhere in the enumerated sources. Extraction is a
//! best-effort lexical scan, not a parse; each file category has one
//! extraction rule, and stricter parsing can be swapped in per category
//! without touching the checkers.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::read_text_lossy;

/// `class Foo` or `class LMMS_EXPORT Foo`, anchored at the start of a line so
/// that forward declarations in the middle of expressions and the word
/// "class" in comments rarely match.
static CXX_CLASS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^class\s+(?:LMMS_EXPORT\s+)?([A-Za-z_]\w*)").unwrap()
});

/// The `<class>` element of a Qt Designer form.
static UI_CLASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<class>([^<]+)</class>").unwrap());

/// File categories the builder knows an extraction rule for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// C++ translation unit or header.
    Cxx,
    /// Qt Designer interface description.
    Ui,
}

impl FileKind {
    /// Categorize a path by suffix; `None` means the file carries no class
    /// declarations we know how to extract.
    pub fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("cpp") | Some("h") => Some(FileKind::Cxx),
            Some("ui") => Some(FileKind::Ui),
            _ => None,
        }
    }

    fn rule(self) -> &'static Regex {
        match self {
            FileKind::Cxx => &CXX_CLASS_REGEX,
            FileKind::Ui => &UI_CLASS_REGEX,
        }
    }
}

/// Extract the declared class names from one file's text.
pub fn extract_classes(kind: FileKind, text: &str) -> impl Iterator<Item = String> + '_ {
    kind.rule()
        .captures_iter(text)
        .map(|c| c[1].trim().to_string())
}

/// The authoritative set of class names declared in source.
///
/// Built once at startup, read-only afterward.
#[derive(Debug, Default)]
pub struct ClassIndex {
    names: BTreeSet<String>,
}

impl ClassIndex {
    /// Scan every enumerated file that still exists and union all extracted
    /// names. Files listed by git but meanwhile deleted from the working
    /// tree are skipped, as are files no extraction rule applies to.
    pub fn build<P: AsRef<Path>>(root: &Path, files: &[P]) -> Self {
        let mut names = BTreeSet::new();
        for rel in files {
            let Some(kind) = FileKind::of(rel.as_ref()) else {
                continue;
            };
            let path = root.join(rel);
            if !path.is_file() {
                continue;
            }
            let Ok(text) = read_text_lossy(&path) else {
                continue;
            };
            names.extend(extract_classes(kind, &text));
        }
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[cfg(test)]
    pub fn from_names<I: IntoIterator<Item = S>, S: Into<String>>(names: I) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}
