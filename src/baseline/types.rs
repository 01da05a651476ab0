//! Catalog entry types written into `manifest.json`.
//!
//! Provenance fields start out unresolved and are filled in later by tool
//! integration; on the wire an unresolved field is the string `"TBD"`.
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Wire marker for a field nobody has filled in yet.
pub const UNRESOLVED_MARKER: &str = "TBD";

/// A manifest field that may not have been resolved yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Pending<T> {
    #[default]
    Unresolved,
    Resolved(T),
}

impl<T: Serialize> Serialize for Pending<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Pending::Unresolved => serializer.serialize_str(UNRESOLVED_MARKER),
            Pending::Resolved(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Pending<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.as_str() == Some(UNRESOLVED_MARKER) {
            return Ok(Pending::Unresolved);
        }
        serde_json::from_value(value)
            .map(Pending::Resolved)
            .map_err(de::Error::custom)
    }
}

/// Catalog entry for generic evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub evidence_id: String,
    pub artifact_type: Pending<String>,
    pub path: String,
    pub sha256: String,
    pub provenance: EvidenceProvenance,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvidenceProvenance {
    pub producer: Pending<String>,
    pub tool: Pending<String>,
    pub tool_version: Pending<String>,
    #[serde(default)]
    pub params: BTreeMap<String, Value>,
    #[serde(default)]
    pub inputs: BTreeMap<String, Value>,
}

/// Catalog entry for a test record under `tests/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestItem {
    pub test_id: String,
    pub path: String,
    pub sha256: String,
    pub outcome: Pending<String>,
    pub provenance: TestProvenance,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TestProvenance {
    pub tool: Pending<String>,
    pub tool_version: Pending<String>,
    #[serde(default)]
    pub params: BTreeMap<String, Value>,
}

/// Catalog entry for an operational observation under `ops/observations/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationItem {
    pub observation_id: String,
    pub path: String,
    pub sha256: String,
    pub provenance: ObservationProvenance,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObservationProvenance {
    pub producer: Pending<String>,
}

/// The three ordered catalogs owned by the builder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalogs {
    pub evidence_items: Vec<EvidenceItem>,
    pub tests: Vec<TestItem>,
    pub observations: Vec<ObservationItem>,
}

/// Counts reported after a manifest rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub manifest_path: std::path::PathBuf,
    pub evidence_count: usize,
    pub test_count: usize,
    pub observation_count: usize,
}
