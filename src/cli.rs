//! CLI argument parsing for the certification pilot commands.
//!
//! The CLI is intentionally thin: each command resolves its inputs and hands
//! them to a single core function, so the algorithms stay reusable.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gold-impact document compared by `compare` when `--left` is omitted.
pub const DEFAULT_COMPARE_LEFT: &str = "evidence/gold/impact/D3_broker_cert_rotation_A.json";
/// Gold-impact document compared by `compare` when `--right` is omitted.
pub const DEFAULT_COMPARE_RIGHT: &str = "evidence/gold/impact/D3_broker_cert_rotation_B.json";

/// Root CLI entrypoint for the pilot workflow.
#[derive(Parser, Debug)]
#[command(
    name = "ecp",
    version,
    about = "Evidence-centric certification pilot tooling",
    after_help = "Commands:\n  manifest <dir> --baseline-id <id>  Rebuild a baseline manifest from its artifact tree\n  eq3 --change-id <id> ...           Score an impact package against gold adjudication\n  compare                            Jaccard agreement between two gold-impact documents\n\nExamples:\n  ecp manifest evidence/baselines/B1 --baseline-id B1\n  ecp eq3 --change-id C1 --baseline-from-manifest evidence/baselines/B1/manifest.json \\\n      --a2-impact a2.json --a1-manual a1.json --gold-adjudicated gold.json --a2-time-minutes 4.5\n  ecp compare",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level pilot commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Manifest(ManifestArgs),
    Eq3(Eq3Args),
    Compare(CompareArgs),
}

impl Command {
    /// Whether the selected command asked for a verbose transcript.
    pub fn verbose(&self) -> bool {
        match self {
            Command::Manifest(args) => args.verbose,
            Command::Eq3(args) => args.verbose,
            Command::Compare(args) => args.verbose,
        }
    }
}

/// Manifest command inputs for a single baseline tree.
#[derive(Parser, Debug)]
#[command(about = "Rebuild manifest.json catalogs for a baseline artifact tree")]
pub struct ManifestArgs {
    /// Baseline root containing manifest.json and its artifacts
    #[arg(value_name = "BASELINE_DIR")]
    pub baseline_dir: PathBuf,

    /// Baseline identifier written to the manifest and embedded in artifact ids
    #[arg(long, value_name = "ID")]
    pub baseline_id: String,

    /// Emit a verbose transcript of the run
    #[arg(long)]
    pub verbose: bool,
}

/// EQ3 command inputs for one change event.
#[derive(Parser, Debug)]
#[command(about = "Compute EQ3 agreement metrics for a single change event")]
pub struct Eq3Args {
    /// Change identifier reported in the first column
    #[arg(long, value_name = "ID")]
    pub change_id: String,

    /// Prior baseline manifest (evidence_items are counted)
    #[arg(long, value_name = "PATH")]
    pub baseline_from_manifest: PathBuf,

    /// Automated impact analysis output (impact_package.*_paths)
    #[arg(long, value_name = "PATH")]
    pub a2_impact: PathBuf,

    /// Manual triage output (triage_time_minutes)
    #[arg(long, value_name = "PATH")]
    pub a1_manual: PathBuf,

    /// Gold adjudicated answer set (refresh_paths, retest_paths)
    #[arg(long, value_name = "PATH")]
    pub gold_adjudicated: PathBuf,

    /// Automated analysis time in minutes; reported as NA when omitted
    #[arg(long, value_name = "MINUTES")]
    pub a2_time_minutes: Option<f64>,

    /// Emit the metrics row as JSON instead of the tagged CSV row
    #[arg(long)]
    pub json: bool,

    /// Also append the CSV row to this report file (header written when new)
    #[arg(long, value_name = "PATH")]
    pub append_csv: Option<PathBuf>,

    /// Emit a verbose transcript of the run
    #[arg(long)]
    pub verbose: bool,
}

/// Compare command inputs; both sides default to the D3 rotation adjudications.
#[derive(Parser, Debug)]
#[command(about = "Jaccard agreement between two gold-impact documents")]
pub struct CompareArgs {
    /// First gold-impact document
    #[arg(long, value_name = "PATH", default_value = DEFAULT_COMPARE_LEFT)]
    pub left: PathBuf,

    /// Second gold-impact document
    #[arg(long, value_name = "PATH", default_value = DEFAULT_COMPARE_RIGHT)]
    pub right: PathBuf,

    /// Emit a verbose transcript of the run
    #[arg(long)]
    pub verbose: bool,
}
