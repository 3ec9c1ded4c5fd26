//! Common utility functions shared across the codebase.

use std::fs;
use std::io;
use std::path::Path;

/// Read a file as text, replacing invalid UTF-8 sequences with U+FFFD.
///
/// Source files and patches in the tree are not uniformly encoded (vendored
/// patches in particular carry Latin-1 author names), so decoding must never
/// abort a run.
pub fn read_text_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
