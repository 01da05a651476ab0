//! Manifest rebuild for a single baseline tree.
//!
//! The catalogs are rebuilt from scratch on every run; only the builder-owned
//! top-level fields are replaced so anything else in the manifest survives.
use super::classify::ArtifactClass;
use super::types::{
    BuildSummary, Catalogs, EvidenceItem, EvidenceProvenance, ObservationItem,
    ObservationProvenance, Pending, TestItem, TestProvenance,
};
use super::MANIFEST_FILE_NAME;
use crate::staging::{collect_files_recursive, write_json_atomic};
use crate::util::{rel_path_string, sha256_file, utc_timestamp};
use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Rewrite `<baseline_root>/manifest.json` with freshly digested catalogs.
pub fn build_manifest(baseline_root: &Path, baseline_id: &str) -> Result<BuildSummary> {
    build_manifest_at(baseline_root, baseline_id, &utc_timestamp())
}

/// Same as [`build_manifest`] with an explicit `timestamp_utc` value.
pub fn build_manifest_at(
    baseline_root: &Path,
    baseline_id: &str,
    timestamp_utc: &str,
) -> Result<BuildSummary> {
    validate_baseline_id(baseline_id)?;
    let manifest_path = baseline_root.join(MANIFEST_FILE_NAME);
    let mut manifest = load_manifest_object(&manifest_path)?;

    let start = Instant::now();
    let catalogs = scan_catalogs(baseline_root, baseline_id)?;
    tracing::info!(
        elapsed_ms = start.elapsed().as_millis(),
        evidence = catalogs.evidence_items.len(),
        tests = catalogs.tests.len(),
        observations = catalogs.observations.len(),
        "baseline scan complete"
    );

    let summary = BuildSummary {
        manifest_path: manifest_path.clone(),
        evidence_count: catalogs.evidence_items.len(),
        test_count: catalogs.tests.len(),
        observation_count: catalogs.observations.len(),
    };
    apply_catalogs(&mut manifest, baseline_id, timestamp_utc, catalogs)?;
    write_json_atomic(&manifest_path, &Value::Object(manifest))
        .with_context(|| format!("write {}", manifest_path.display()))?;
    Ok(summary)
}

fn validate_baseline_id(baseline_id: &str) -> Result<()> {
    if baseline_id.trim().is_empty() {
        return Err(anyhow!("baseline id must not be empty"));
    }
    Ok(())
}

fn load_manifest_object(path: &Path) -> Result<Map<String, Value>> {
    let bytes = fs::read(path).with_context(|| format!("read manifest {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse manifest {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(anyhow!(
            "manifest {} must contain a JSON object",
            path.display()
        )),
    }
}

/// Walk the baseline tree in path order and build all three catalogs.
///
/// Every file is digested before anything is written, so an unreadable
/// artifact fails the whole run.
pub fn scan_catalogs(baseline_root: &Path, baseline_id: &str) -> Result<Catalogs> {
    let mut catalogs = Catalogs::default();
    let mut stems_seen: BTreeMap<String, String> = BTreeMap::new();

    for path in collect_files_recursive(baseline_root)? {
        // Manifests are never artifacts, including nested ones.
        if path.file_name().is_some_and(|name| name == MANIFEST_FILE_NAME) {
            continue;
        }
        let rel = rel_path_string(baseline_root, &path)?;
        let class = ArtifactClass::of(&rel);
        let sha256 = sha256_file(&path)?;
        tracing::debug!(path = %rel, class = %class, sha256 = %sha256, "catalogued artifact");

        match class {
            ArtifactClass::Evidence => {
                let seq = catalogs.evidence_items.len() + 1;
                catalogs.evidence_items.push(EvidenceItem {
                    evidence_id: sequence_id(class, baseline_id, seq),
                    artifact_type: Pending::Unresolved,
                    path: rel,
                    sha256,
                    provenance: EvidenceProvenance::default(),
                });
            }
            ArtifactClass::Test => {
                let test_id = stem_id(class, baseline_id, &rel);
                warn_on_collision(&mut stems_seen, &test_id, &rel);
                catalogs.tests.push(TestItem {
                    test_id,
                    path: rel,
                    sha256,
                    outcome: Pending::Unresolved,
                    provenance: TestProvenance::default(),
                });
            }
            ArtifactClass::Observation => {
                let observation_id = stem_id(class, baseline_id, &rel);
                warn_on_collision(&mut stems_seen, &observation_id, &rel);
                catalogs.observations.push(ObservationItem {
                    observation_id,
                    path: rel,
                    sha256,
                    provenance: ObservationProvenance::default(),
                });
            }
        }
    }
    Ok(catalogs)
}

/// Identifier for position-numbered catalogs, e.g. `E-B1-007`.
pub fn sequence_id(class: ArtifactClass, baseline_id: &str, seq: usize) -> String {
    format!("{}-{baseline_id}-{seq:03}", class.id_tag())
}

/// Identifier for name-keyed catalogs, e.g. `T-B1-t1` for `tests/t1.json`.
pub fn stem_id(class: ArtifactClass, baseline_id: &str, rel_path: &str) -> String {
    let stem = Path::new(rel_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}-{baseline_id}-{stem}", class.id_tag())
}

// Base-name collisions are a known limitation; both entries are still written.
fn warn_on_collision(seen: &mut BTreeMap<String, String>, id: &str, rel: &str) {
    if let Some(first) = seen.get(id) {
        tracing::warn!(id, first = %first, duplicate = rel, "artifact id collision");
    } else {
        seen.insert(id.to_string(), rel.to_string());
    }
}

/// Replace the builder-owned fields of a loaded manifest.
pub fn apply_catalogs(
    manifest: &mut Map<String, Value>,
    baseline_id: &str,
    timestamp_utc: &str,
    catalogs: Catalogs,
) -> Result<()> {
    manifest.insert(
        "baseline_id".to_string(),
        Value::String(baseline_id.to_string()),
    );
    manifest.insert(
        "timestamp_utc".to_string(),
        Value::String(timestamp_utc.to_string()),
    );
    manifest.insert(
        "evidence_items".to_string(),
        serde_json::to_value(catalogs.evidence_items).context("serialize evidence items")?,
    );
    manifest.insert(
        "tests".to_string(),
        serde_json::to_value(catalogs.tests).context("serialize tests")?,
    );
    manifest.insert(
        "observations".to_string(),
        serde_json::to_value(catalogs.observations).context("serialize observations")?,
    );
    Ok(())
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
