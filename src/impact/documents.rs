//! Typed views over the JSON documents the impact engine reads.
//!
//! Only the fields the metrics use are modeled; everything else in a document
//! is ignored. Missing path lists and times fall back to empty or zero.
use super::similarity::PathSet;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Flat path-set layout shared by gold adjudications and manual triage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathSetDocument {
    #[serde(default)]
    pub refresh_paths: Vec<String>,
    #[serde(default)]
    pub retest_paths: Vec<String>,
    #[serde(default)]
    pub triage_time_minutes: Option<f64>,
}

impl PathSetDocument {
    pub fn refresh_set(&self) -> PathSet {
        self.refresh_paths.iter().cloned().collect()
    }

    pub fn retest_set(&self) -> PathSet {
        self.retest_paths.iter().cloned().collect()
    }

    /// Recorded triage time, 0.0 when the document has none.
    pub fn triage_minutes(&self) -> f64 {
        self.triage_time_minutes.unwrap_or(0.0)
    }
}

/// Automated analyzer output; the path sets sit under `impact_package`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImpactPackageDocument {
    #[serde(default)]
    pub impact_package: PathSetDocument,
}

/// The slice of a baseline manifest the engine needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaselineManifestDocument {
    #[serde(default)]
    pub evidence_items: Vec<serde_json::Value>,
}

impl BaselineManifestDocument {
    pub fn evidence_count(&self) -> usize {
        self.evidence_items.len()
    }
}

/// Read and parse a JSON document, naming the file in any error.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let value =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
