//! lmms-xref - cross-reference consistency checker for the LMMS source tree
//!
//! Class names leak out of the compiled tree: translation catalogs reference
//! them as contexts, theme stylesheets select them, and vendored patches name
//! files under `plugins/`. None of those references are seen by the compiler,
//! so a rename silently breaks localization, theming, or patch application.
//!
//! This crate builds an index of every class declared in source and validates
//! all external references against it (or against the working tree, for patch
//! paths).
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, run loop, exit codes)
//! - `checkers`: The four reference validators (submodules, translations, stylesheets, patches)
//! - `enumerate`: Tracked-file listing via git for the primary and nested projects
//! - `index`: Class Index construction from C++ and Qt Designer sources
//! - `issues`: Issue type definitions
//! - `project`: Repository layout conventions and identity checks
//! - `report`: Human-readable reporting
//! - `utils`: Shared utility functions

pub mod checkers;
pub mod cli;
pub mod enumerate;
pub mod index;
pub mod issues;
pub mod project;
pub mod report;
pub mod utils;
