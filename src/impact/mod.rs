//! Change-impact agreement metrics.
//!
//! Scores automated impact packages against human-adjudicated gold sets and
//! compares gold sets with each other.
mod compare;
mod documents;
mod eq3;
mod similarity;

pub use compare::{compare_gold_files, GoldAgreement};
pub use eq3::{compute_eq3, Eq3Inputs, Eq3Paths, Eq3Row, CSV_HEADER, CSV_ROW_TAG};
