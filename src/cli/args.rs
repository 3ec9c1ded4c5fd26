//! CLI argument definitions using clap.
//!
//! The checker takes no configuration: every input path is a fixed
//! convention of the tree it is run from, so the interface is a single
//! invocation from the repository root.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Print scan statistics before the report
    #[arg(short, long)]
    pub verbose: bool,
}
