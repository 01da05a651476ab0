//! Path-prefix classification of baseline artifacts.
use std::fmt;

/// Relative-path prefix for test records.
pub const TESTS_PREFIX: &str = "tests/";
/// Relative-path prefix for operational observation records.
pub const OBSERVATIONS_PREFIX: &str = "ops/observations/";

/// Catalog an artifact lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactClass {
    Evidence,
    Test,
    Observation,
}

impl ArtifactClass {
    /// Classify a `/`-separated path relative to the baseline root.
    pub fn of(rel_path: &str) -> Self {
        if rel_path.starts_with(TESTS_PREFIX) {
            ArtifactClass::Test
        } else if rel_path.starts_with(OBSERVATIONS_PREFIX) {
            ArtifactClass::Observation
        } else {
            ArtifactClass::Evidence
        }
    }

    /// One-letter tag leading every identifier in this catalog.
    pub fn id_tag(self) -> char {
        match self {
            ArtifactClass::Evidence => 'E',
            ArtifactClass::Test => 'T',
            ArtifactClass::Observation => 'O',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactClass::Evidence => "evidence",
            ArtifactClass::Test => "test",
            ArtifactClass::Observation => "observation",
        }
    }
}

impl fmt::Display for ArtifactClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
