//! EQ3 scoring of an automated impact package against gold adjudication.
//!
//! Only the refresh path sets are scored. Retest sets are carried through as
//! counts so reports can grow a retest column without changing extraction.
use super::documents::{
    load_document, BaselineManifestDocument, ImpactPackageDocument, PathSetDocument,
};
use super::similarity::{jaccard, precision_recall, reduction_ratio};
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::path::Path;

/// Tag line printed above the CSV row.
pub const CSV_ROW_TAG: &str = "CSV_ROW_EQ3:";
/// Column header for appended EQ3 reports.
pub const CSV_HEADER: &str =
    "Change,|E*|,|E_A2|,Prec,Rec,Jaccard,Reduct vs A0,Triage time (A1/A2)";
/// Rendering for an automated time that was not measured.
pub const NOT_AVAILABLE: &str = "NA";

/// The four documents scored for one change event.
#[derive(Debug, Clone, Default)]
pub struct Eq3Inputs {
    pub baseline: BaselineManifestDocument,
    pub impact: ImpactPackageDocument,
    pub manual: PathSetDocument,
    pub gold: PathSetDocument,
}

/// Document locations for [`Eq3Inputs::load`].
#[derive(Debug, Clone, Copy)]
pub struct Eq3Paths<'a> {
    pub baseline_manifest: &'a Path,
    pub impact_package: &'a Path,
    pub manual_triage: &'a Path,
    pub gold_adjudication: &'a Path,
}

impl Eq3Inputs {
    pub fn load(paths: Eq3Paths<'_>) -> Result<Self> {
        Ok(Self {
            baseline: load_document(paths.baseline_manifest)?,
            impact: load_document(paths.impact_package)?,
            manual: load_document(paths.manual_triage)?,
            gold: load_document(paths.gold_adjudication)?,
        })
    }
}

/// Manual triage time paired with the optional automated analysis time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TriageTimes {
    #[serde(rename = "manual_triage_minutes")]
    pub manual_minutes: f64,
    #[serde(rename = "automated_triage_minutes")]
    pub automated_minutes: Option<f64>,
}

impl TriageTimes {
    /// `manual/automated` at two decimals, `NA` for an unmeasured automated run.
    pub fn cell(&self) -> String {
        let automated = match self.automated_minutes {
            Some(minutes) => format!("{minutes:.2}"),
            None => NOT_AVAILABLE.to_string(),
        };
        format!("{:.2}/{automated}", self.manual_minutes)
    }
}

/// One scored change event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Eq3Row {
    pub change_id: String,
    pub gold_refresh_count: usize,
    pub predicted_refresh_count: usize,
    pub precision: f64,
    pub recall: f64,
    pub jaccard: f64,
    pub reduction_ratio: f64,
    #[serde(flatten)]
    pub triage: TriageTimes,
    pub gold_retest_count: usize,
    pub predicted_retest_count: usize,
}

impl Eq3Row {
    /// Comma-joined row; ratios at three decimals, times at two.
    pub fn csv_row(&self) -> String {
        [
            self.change_id.clone(),
            self.gold_refresh_count.to_string(),
            self.predicted_refresh_count.to_string(),
            format!("{:.3}", self.precision),
            format!("{:.3}", self.recall),
            format!("{:.3}", self.jaccard),
            format!("{:.3}", self.reduction_ratio),
            self.triage.cell(),
        ]
        .join(",")
    }
}

/// Reject automated times that cannot be a measured duration.
pub fn validate_automated_minutes(minutes: Option<f64>) -> Result<()> {
    match minutes {
        Some(value) if !value.is_finite() || value < 0.0 => Err(anyhow!(
            "automated triage time must be a non-negative number of minutes (got {value})"
        )),
        _ => Ok(()),
    }
}

/// Score one change event.
pub fn compute_eq3(
    change_id: &str,
    inputs: &Eq3Inputs,
    automated_minutes: Option<f64>,
) -> Result<Eq3Row> {
    validate_automated_minutes(automated_minutes)?;

    let gold_refresh = inputs.gold.refresh_set();
    let gold_retest = inputs.gold.retest_set();
    let predicted_refresh = inputs.impact.impact_package.refresh_set();
    let predicted_retest = inputs.impact.impact_package.retest_set();

    let (precision, recall) = precision_recall(&predicted_refresh, &gold_refresh);
    let evidence_count = inputs.baseline.evidence_count();
    tracing::debug!(
        gold_refresh = gold_refresh.len(),
        predicted_refresh = predicted_refresh.len(),
        baseline_evidence = evidence_count,
        "scoring change"
    );

    Ok(Eq3Row {
        change_id: change_id.to_string(),
        gold_refresh_count: gold_refresh.len(),
        predicted_refresh_count: predicted_refresh.len(),
        precision,
        recall,
        jaccard: jaccard(&predicted_refresh, &gold_refresh),
        reduction_ratio: reduction_ratio(predicted_refresh.len(), evidence_count),
        triage: TriageTimes {
            manual_minutes: inputs.manual.triage_minutes(),
            automated_minutes,
        },
        gold_retest_count: gold_retest.len(),
        predicted_retest_count: predicted_retest.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn inputs(gold: &[&str], predicted: &[&str], evidence: usize) -> Eq3Inputs {
        Eq3Inputs {
            baseline: BaselineManifestDocument {
                evidence_items: vec![serde_json::json!({}); evidence],
            },
            impact: ImpactPackageDocument {
                impact_package: PathSetDocument {
                    refresh_paths: paths(predicted),
                    ..PathSetDocument::default()
                },
            },
            manual: PathSetDocument {
                triage_time_minutes: Some(42.5),
                ..PathSetDocument::default()
            },
            gold: PathSetDocument {
                refresh_paths: paths(gold),
                ..PathSetDocument::default()
            },
        }
    }

    #[test]
    fn partial_overlap_against_ten_item_baseline() {
        let row = compute_eq3("C1", &inputs(&["a", "b", "c"], &["a", "b", "d"], 10), None)
            .expect("score");
        assert_eq!(row.gold_refresh_count, 3);
        assert_eq!(row.predicted_refresh_count, 3);
        assert_eq!(row.csv_row(), "C1,3,3,0.667,0.667,0.500,0.700,42.50/NA");
    }

    #[test]
    fn both_empty_scores_perfectly() {
        let row = compute_eq3("C2", &inputs(&[], &[], 4), Some(3.0)).expect("score");
        assert_eq!(row.precision, 1.0);
        assert_eq!(row.recall, 1.0);
        assert_eq!(row.jaccard, 1.0);
        assert_eq!(row.reduction_ratio, 1.0);
        assert_eq!(row.csv_row(), "C2,0,0,1.000,1.000,1.000,1.000,42.50/3.00");
    }

    #[test]
    fn empty_baseline_reduction_is_full_regardless_of_prediction() {
        let row = compute_eq3("C3", &inputs(&["a"], &["a", "b", "c"], 0), None).expect("score");
        assert_eq!(row.reduction_ratio, 1.0);
    }

    #[test]
    fn retest_sets_are_counted_but_not_scored() {
        let mut scored = inputs(&["a"], &["a"], 2);
        scored.gold.retest_paths = paths(&["tests/t1.json", "tests/t2.json"]);
        scored.impact.impact_package.retest_paths = paths(&["tests/t9.json"]);
        let row = compute_eq3("C4", &scored, None).expect("score");
        assert_eq!(row.gold_retest_count, 2);
        assert_eq!(row.predicted_retest_count, 1);
        assert_eq!(row.precision, 1.0);
        assert_eq!(row.recall, 1.0);
    }

    #[test]
    fn missing_manual_time_defaults_to_zero() {
        let mut scored = inputs(&[], &[], 0);
        scored.manual.triage_time_minutes = None;
        let row = compute_eq3("C5", &scored, Some(1.234)).expect("score");
        assert_eq!(row.triage.cell(), "0.00/1.23");
    }

    #[test]
    fn negative_or_non_finite_automated_time_is_rejected() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(compute_eq3("C6", &inputs(&[], &[], 0), Some(bad)).is_err());
        }
    }

    #[test]
    fn json_row_reports_absent_automated_time_as_null() {
        let row = compute_eq3("C7", &inputs(&["a"], &["a"], 1), None).expect("score");
        let value = serde_json::to_value(&row).expect("serialize");
        assert_eq!(value["automated_triage_minutes"], serde_json::Value::Null);
        assert_eq!(value["manual_triage_minutes"], 42.5);
        assert_eq!(value["change_id"], "C7");
    }
}
