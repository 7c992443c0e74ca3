//! Site Hazard Timeline Service - Daily Report Binary
//!
//! Turns one day's enhanced analysis file into the per-center report:
//! 1. Locates `enhanced_analysis_<date>.json` (or takes `--input`)
//! 2. Groups records by center and reconstructs each hazard timeline
//! 3. Ranks centers by hazard detections
//! 4. Writes `center_analysis_<date>.json` and `center_report_<date>.txt`
//!
//! Usage:
//!   cargo run --release                          # yesterday's report
//!   cargo run --release -- --date 2025-07-14     # a specific day
//!   cargo run --release -- --input day.json --date 2025-07-14 --workers 4
//!
//! Environment:
//!   HAZMON_CONFIG, HAZMON_INPUT_DIR, HAZMON_REPORTS_DIR, HAZMON_LOG

use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use hazmon_service::analysis::daily_report::ReportBuilder;
use hazmon_service::config::load_config_default;
use hazmon_service::ingest::analysis_file::{default_report_date, load_records, locate, validate_date};
use hazmon_service::logging;
use hazmon_service::model::HazmonError;
use hazmon_service::report::{output::write_reports, text};

#[derive(Parser, Debug)]
#[command(name = "hazmon")]
#[command(version, about = "Per-center hazard timeline report for one day of analysis data")]
struct Args {
    /// Report date (YYYY-MM-DD); defaults to yesterday
    #[arg(long)]
    date: Option<String>,

    /// Analysis file to read instead of searching the input directories
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory the reports are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Configuration file (default: hazmon.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Threads used for per-center summarization
    #[arg(long)]
    workers: Option<usize>,

    /// Skip printing the text report
    #[arg(long)]
    quiet: bool,
}

fn run(args: Args) -> Result<(), HazmonError> {
    let mut config = load_config_default(args.config.as_deref())?;
    if let Some(dir) = args.output_dir {
        config.output.reports_dir = dir;
    }
    if let Some(workers) = args.workers {
        config.analysis.parallel_workers = workers;
    }

    logging::init(&config.logging.level);

    let date = args.date.unwrap_or_else(default_report_date);
    validate_date(&date)?;

    let path = match args.input {
        Some(path) => path,
        None => locate(&date, &config.input)?,
    };
    println!("Loading analysis data for {}...", date);
    let records = load_records(&path)?;

    info!(date = %date, path = %path.display(), "creating center-focused report");
    let report = ReportBuilder::from_config(&config.analysis).build(
        &date,
        records,
        Local::now().naive_local(),
    );

    if !args.quiet {
        println!();
        print!("{}", text::render(&report));
    }

    let written = write_reports(&report, &config.output)?;
    println!();
    println!("FILES CREATED:");
    println!("JSON Report: {}", written.json_path.display());
    println!("Text Report: {}", written.text_path.display());

    println!();
    print!("{}", text::render_quick_summary(&report));

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("\n❌ {}\n", e);
        std::process::exit(1);
    }
}
