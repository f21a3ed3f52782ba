//! # Folio CLI
//!
//! Usage:
//!   folio target.json narrative.json -o reports/
//!   folio target.json narrative.json --generated-at 2026-03-01T12:00:00Z --trace

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::Parser;

use folio::{FolioError, ReportOptions};

/// Render a penetration-test report PDF from target metadata and narrative
/// results.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Target metadata JSON (target, session_id, completed_at)
    target_json: PathBuf,

    /// Narrative results JSON (findings, compliance, snippets, anti-patterns)
    narrative_json: PathBuf,

    /// Directory the PDF is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Timestamp printed in the footer (RFC 3339); defaults to now
    #[arg(long, value_parser = parse_timestamp)]
    generated_at: Option<DateTime<Utc>>,

    /// Print the placement trace as JSON to stdout
    #[arg(long)]
    trace: bool,
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn run(cli: Cli) -> Result<(), FolioError> {
    let target = fs::read_to_string(&cli.target_json)?;
    let narrative = fs::read_to_string(&cli.narrative_json)?;
    let options = ReportOptions::new(cli.generated_at.unwrap_or_else(Utc::now));

    let report = folio::render_json(&target, &narrative, &options)?;

    fs::create_dir_all(&cli.output_dir)?;
    let path = cli.output_dir.join(&report.file_name);
    fs::write(&path, &report.bytes)?;
    log::info!(
        "wrote {} bytes ({} pages) to {}",
        report.bytes.len(),
        report.page_count,
        path.display()
    );

    if cli.trace {
        let json = serde_json::to_string_pretty(&report.trace)
            .map_err(|e| FolioError::Render(format!("trace serialization failed: {e}")))?;
        println!("{json}");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
