//! Set-agreement primitives shared by EQ3 scoring and gold comparisons.
//!
//! Degenerate inputs resolve to fixed conventions instead of dividing by zero.
use std::collections::BTreeSet;

/// Distinct artifact paths.
pub type PathSet = BTreeSet<String>;

/// |a ∩ b| / |a ∪ b|, with two empty sets agreeing perfectly.
pub fn jaccard(a: &PathSet, b: &PathSet) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Precision and recall of `predicted` against `gold`.
///
/// Both empty scores (1.0, 1.0). An empty prediction against non-empty gold
/// scores (0.0, 0.0). A non-empty prediction against empty gold scores
/// precision 0.0 and recall 1.0: nothing expected was missed.
pub fn precision_recall(predicted: &PathSet, gold: &PathSet) -> (f64, f64) {
    if predicted.is_empty() && gold.is_empty() {
        return (1.0, 1.0);
    }
    if predicted.is_empty() {
        return (0.0, 0.0);
    }
    let true_positives = predicted.intersection(gold).count() as f64;
    let precision = true_positives / predicted.len() as f64;
    let recall = if gold.is_empty() {
        1.0
    } else {
        true_positives / gold.len() as f64
    };
    (precision, recall)
}

/// 1 − predicted / baseline evidence; an empty baseline counts as full reduction.
///
/// Not clamped: predicting more artifacts than the baseline holds goes negative.
pub fn reduction_ratio(predicted_count: usize, baseline_evidence_count: usize) -> f64 {
    if baseline_evidence_count == 0 {
        return 1.0;
    }
    1.0 - predicted_count as f64 / baseline_evidence_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(paths: &[&str]) -> PathSet {
        paths.iter().map(|path| path.to_string()).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_sets_agree_perfectly() {
        let empty = PathSet::new();
        assert_eq!(jaccard(&empty, &empty), 1.0);
        assert_eq!(precision_recall(&empty, &empty), (1.0, 1.0));
    }

    #[test]
    fn empty_prediction_against_gold_scores_zero() {
        assert_eq!(precision_recall(&PathSet::new(), &set(&["a"])), (0.0, 0.0));
        assert_eq!(jaccard(&PathSet::new(), &set(&["a"])), 0.0);
    }

    #[test]
    fn prediction_against_empty_gold_has_zero_precision_full_recall() {
        assert_eq!(precision_recall(&set(&["a", "b"]), &PathSet::new()), (0.0, 1.0));
    }

    #[test]
    fn jaccard_of_overlapping_pairs() {
        assert_close(jaccard(&set(&["a", "b"]), &set(&["b", "c"])), 1.0 / 3.0);
        assert_close(jaccard(&set(&["a", "b", "c"]), &set(&["a", "b", "d"])), 0.5);
        assert_eq!(jaccard(&set(&["x"]), &set(&["x"])), 1.0);
    }

    #[test]
    fn precision_and_recall_of_partial_overlap() {
        let (precision, recall) = precision_recall(&set(&["a", "b", "d"]), &set(&["a", "b", "c"]));
        assert_close(precision, 2.0 / 3.0);
        assert_close(recall, 2.0 / 3.0);

        let (precision, recall) = precision_recall(&set(&["a"]), &set(&["a", "b", "c", "d"]));
        assert_close(precision, 1.0);
        assert_close(recall, 0.25);
    }

    #[test]
    fn reduction_against_baseline_size() {
        assert_close(reduction_ratio(3, 10), 0.7);
        assert_close(reduction_ratio(0, 10), 1.0);
        assert_close(reduction_ratio(15, 10), -0.5);
    }

    #[test]
    fn reduction_with_empty_baseline_is_full() {
        for predicted in [0, 1, 50] {
            assert_eq!(reduction_ratio(predicted, 0), 1.0);
        }
    }
}
