//! Baseline manifest construction.
//!
//! A baseline is a directory of certification artifacts with a
//! `manifest.json` at its root. The builder classifies and digests every
//! artifact and rewrites the manifest catalogs in place.

/// File name of the manifest document at the baseline root.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

mod build;
mod classify;
mod types;

pub use build::build_manifest;
pub use types::BuildSummary;
