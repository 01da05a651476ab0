//! Pairwise agreement between two gold-impact adjudications.
use super::documents::load_document;
use super::similarity::{jaccard, PathSet};
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// Gold-impact layout; unlike the EQ3 inputs both lists are required here.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldImpactDocument {
    pub refresh_paths: Vec<String>,
    pub retest_paths: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoldAgreement {
    pub refresh_jaccard: f64,
    pub retest_jaccard: f64,
}

pub fn compare_gold(left: &GoldImpactDocument, right: &GoldImpactDocument) -> GoldAgreement {
    GoldAgreement {
        refresh_jaccard: jaccard(
            &path_set(&left.refresh_paths),
            &path_set(&right.refresh_paths),
        ),
        retest_jaccard: jaccard(&path_set(&left.retest_paths), &path_set(&right.retest_paths)),
    }
}

fn path_set(paths: &[String]) -> PathSet {
    paths.iter().cloned().collect()
}

pub fn compare_gold_files(left: &Path, right: &Path) -> Result<GoldAgreement> {
    let left_doc: GoldImpactDocument = load_document(left)?;
    let right_doc: GoldImpactDocument = load_document(right)?;
    Ok(compare_gold(&left_doc, &right_doc))
}
