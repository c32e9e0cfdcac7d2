use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use log::info;

use triage_stats::config::parse_limit;
use triage_stats::{Aggregator, IntakeRecord, ReportBuilder, ReportConfig};
use triage_stats::{derive_associated_field, load_records};

/// Triage statistics over clinical-intake records
#[derive(Debug, Parser)]
#[command(name = "triage-stats", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Aggregate a JSON Lines file and print the statistics
    Stats {
        /// Input file, one intake record per line
        input: PathBuf,
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Entries per symptom ranking (`all` for no limit)
        #[arg(long, value_name = "N")]
        top: Option<String>,
        /// Durations shown per symptom (`all` for no limit)
        #[arg(long, value_name = "N")]
        durations_top: Option<String>,
    },
    /// Add an `associated_symptom` column to every record
    Derive {
        /// Input file, one intake record per line
        input: PathBuf,
    },
}

fn limit_arg(flag: &str, raw: &str) -> Result<Option<usize>> {
    parse_limit(raw).map_err(|msg| anyhow!("--{flag} {raw:?}: {msg}"))
}

fn run_stats(
    input: &Path,
    json: bool,
    top: Option<&str>,
    durations_top: Option<&str>,
) -> Result<()> {
    let mut config = ReportConfig::from_env().context("Invalid report configuration")?;
    if let Some(raw) = top {
        config = config.with_symptom_limit(limit_arg("top", raw)?);
    }
    if let Some(raw) = durations_top {
        config = config.with_durations_per_symptom(limit_arg("durations-top", raw)?);
    }
    info!("{config}");

    let raw_records = load_records(input)
        .with_context(|| format!("Failed to load records from {}", input.display()))?;

    let start = Instant::now();
    let records: Vec<IntakeRecord> = raw_records.iter().map(IntakeRecord::from).collect();
    let aggregates = Aggregator::aggregate(&records);
    let report = ReportBuilder::new(config).build(&aggregates);
    info!(
        "Built report for {} records in {:?}",
        report.records,
        start.elapsed()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if json {
        serde_json::to_writer_pretty(&mut out, &report).context("Failed to serialize report")?;
        writeln!(out)?;
    } else {
        write!(out, "{report}")?;
    }
    out.flush()?;
    Ok(())
}

fn run_derive(input: &Path) -> Result<()> {
    let raw_records = load_records(input)
        .with_context(|| format!("Failed to load records from {}", input.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for raw in &raw_records {
        serde_json::to_writer(&mut out, &derive_associated_field(raw))
            .context("Failed to serialize record")?;
        writeln!(out)?;
    }
    out.flush()?;
    info!("Derived associated symptoms for {} records", raw_records.len());
    Ok(())
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Stats {
            input,
            json,
            top,
            durations_top,
        } => run_stats(input, *json, top.as_deref(), durations_top.as_deref()),
        Command::Derive { input } => run_derive(input),
    }
}
