//! Report formatting and printing.
//!
//! Output is organized into one labeled section per checker: a caption
//! line, then one `Error: <location>: <message>` line per issue. The error
//! lines themselves stay uncolored so they can be grepped and diffed; only
//! the captions and the summary are styled.

use std::io::{self, Write};

use colored::Colorize;

use crate::cli::run::{RunResult, Section};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print the full run result to stdout.
pub fn print(result: &RunResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

/// Print the full run result to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn print_to<W: Write>(result: &RunResult, verbose: bool, writer: &mut W) {
    if verbose {
        let _ = writeln!(
            writer,
            "Scanned {} tracked files, indexed {} classes",
            result.scanned_files, result.indexed_classes
        );
        let _ = writeln!(writer);
    }

    for section in &result.sections {
        print_section(section, writer);
    }

    print_summary(result.error_count(), writer);
}

fn print_section<W: Write>(section: &Section, writer: &mut W) {
    let _ = writeln!(writer, "{}", section.caption.bold());
    for issue in &section.issues {
        let _ = writeln!(writer, "{}", issue);
    }
    let _ = writeln!(writer);
}

// The total is printed even when it is zero, so the summary line is the
// same shape on every run.
fn print_summary<W: Write>(count: usize, writer: &mut W) {
    let total = format!(
        "Found {} consistency {}",
        count,
        if count == 1 { "error" } else { "errors" }
    );
    let msg = if count == 0 {
        format!("{} {}", SUCCESS_MARK.green(), total.green())
    } else {
        format!("{} {}", FAILURE_MARK.red(), total.red())
    };
    let _ = writeln!(writer, "{}", msg);
}
