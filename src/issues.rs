//! Issue types for cross-reference check results.
//!
//! Every mismatch found by a checker becomes one [`Issue`]: a rule identifier
//! plus a `(location, message)` pair. Issues are accumulated across all
//! checkers and folded into the final exit status by the reporter.

use std::fmt;

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingSubmodule,
    UnknownTranslationClass,
    MissingNamespacePrefix,
    UnknownStylesheetClass,
    MissingPatchTarget,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::MissingSubmodule => write!(f, "missing-submodule"),
            Rule::UnknownTranslationClass => write!(f, "unknown-translation-class"),
            Rule::MissingNamespacePrefix => write!(f, "missing-namespace-prefix"),
            Rule::UnknownStylesheetClass => write!(f, "unknown-stylesheet-class"),
            Rule::MissingPatchTarget => write!(f, "missing-patch-target"),
        }
    }
}

/// One cross-reference mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub rule: Rule,
    /// File or directory the reference was found in, relative to the root.
    pub location: String,
    pub message: String,
}

impl Issue {
    pub fn new(rule: Rule, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}: {}", self.location, self.message)
    }
}
