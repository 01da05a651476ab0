use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod baseline;
mod cli;
mod impact;
mod staging;
mod util;

use cli::{Command, CompareArgs, Eq3Args, ManifestArgs, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.command.verbose());

    match args.command {
        Command::Manifest(args) => cmd_manifest(&args),
        Command::Eq3(args) => cmd_eq3(&args),
        Command::Compare(args) => cmd_compare(&args),
    }
}

/// Logs go to stderr so stdout stays reserved for command results.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn cmd_manifest(args: &ManifestArgs) -> Result<()> {
    tracing::info!(baseline = %args.baseline_dir.display(), baseline_id = %args.baseline_id, "rebuilding manifest");
    let summary = baseline::build_manifest(&args.baseline_dir, &args.baseline_id)?;
    println!("{}", manifest_summary_line(&summary));
    Ok(())
}

fn manifest_summary_line(summary: &baseline::BuildSummary) -> String {
    format!(
        "Wrote {} with {} evidence items, {} tests, {} observations.",
        summary.manifest_path.display(),
        summary.evidence_count,
        summary.test_count,
        summary.observation_count
    )
}

fn cmd_eq3(args: &Eq3Args) -> Result<()> {
    let inputs = impact::Eq3Inputs::load(impact::Eq3Paths {
        baseline_manifest: &args.baseline_from_manifest,
        impact_package: &args.a2_impact,
        manual_triage: &args.a1_manual,
        gold_adjudication: &args.gold_adjudicated,
    })?;
    let row = impact::compute_eq3(&args.change_id, &inputs, args.a2_time_minutes)?;

    if let Some(report) = &args.append_csv {
        staging::append_line_with_header(report, impact::CSV_HEADER, &row.csv_row())?;
        tracing::info!(report = %report.display(), "appended EQ3 row");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&row)?);
    } else {
        print!("{}", eq3_tagged_csv(&row));
    }
    Ok(())
}

fn eq3_tagged_csv(row: &impact::Eq3Row) -> String {
    format!("{}\n{}\n", impact::CSV_ROW_TAG, row.csv_row())
}

fn cmd_compare(args: &CompareArgs) -> Result<()> {
    let agreement = impact::compare_gold_files(&args.left, &args.right)?;
    print!("{}", compare_lines(&agreement));
    Ok(())
}

fn compare_lines(agreement: &impact::GoldAgreement) -> String {
    format!(
        "Jaccard(refresh_paths): {}\nJaccard(retest_paths): {}\n",
        score_repr(agreement.refresh_jaccard),
        score_repr(agreement.retest_jaccard)
    )
}

/// Shortest round-trip rendering with a signed, two-digit exponent (`3.3e-05`).
fn score_repr(value: f64) -> String {
    let shortest = format!("{value:?}");
    let Some((mantissa, exponent)) = shortest.split_once('e') else {
        return shortest;
    };
    match exponent.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        Err(_) => shortest,
    }
}
