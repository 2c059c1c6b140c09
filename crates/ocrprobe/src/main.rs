//! Runs the OCR verification flows against the locally installed tools.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tempfile::TempDir;
use tracing::{error, info};

use ocrprobe::config::{load_config, ProbeConfig};
use ocrprobe::{logging, ExpectedDecimal, FlowKind, FlowReport, Probe, Scenario};

/// Check that tesseract and pdftoppm read decimal numbers back correctly
#[derive(Parser)]
#[command(name = "ocrprobe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print reports as JSON and log as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw text into a PNG and check OCR reads the number back
    Image(FlowArgs),

    /// Set text in a PDF, rasterize it and check OCR reads the number back
    Pdf(FlowArgs),

    /// Run the built-in image and PDF scenarios
    Check(WorkDirArgs),

    /// Print the version reported by each configured tool
    Doctor,
}

#[derive(Args)]
struct FlowArgs {
    /// Fixture text, e.g. "Total: 123.45"
    #[arg(long)]
    text: String,

    /// Number OCR must recover; either '.' or ',' as separator
    #[arg(long)]
    expect: ExpectedDecimal,

    #[command(flatten)]
    work_dir: WorkDirArgs,
}

#[derive(Args)]
struct WorkDirArgs {
    /// Keep artifacts in this directory instead of a temporary one
    #[arg(long)]
    work_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json)?;

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ProbeConfig::default(),
    };
    let probe = Probe::new(config)?;

    match cli.command {
        Commands::Image(args) => {
            let scenario = Scenario::new(FlowKind::Image, args.text, args.expect);
            run_scenarios(&probe, &[scenario], args.work_dir.work_dir.as_deref(), cli.json)
        }
        Commands::Pdf(args) => {
            let scenario = Scenario::new(FlowKind::Pdf, args.text, args.expect);
            run_scenarios(&probe, &[scenario], args.work_dir.work_dir.as_deref(), cli.json)
        }
        Commands::Check(args) => {
            run_scenarios(&probe, &Scenario::builtin()?, args.work_dir.as_deref(), cli.json)
        }
        Commands::Doctor => doctor(&probe, cli.json),
    }
}

fn run_scenarios(
    probe: &Probe,
    scenarios: &[Scenario],
    work_dir: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let mut failures = Vec::new();

    for scenario in scenarios {
        // Dropping the guard removes the temporary directory.
        let (_guard, dir) = match work_dir {
            Some(dir) => (None, dir.to_path_buf()),
            None => {
                let temp = tempfile::Builder::new()
                    .prefix("ocrprobe-")
                    .tempdir()
                    .context("Failed to create temporary work directory")?;
                let path = temp.path().to_path_buf();
                (Some::<TempDir>(temp), path)
            }
        };

        let report = probe
            .run(&dir, scenario)
            .with_context(|| format!("{} flow for {:?} failed", scenario.kind, scenario.text))?;
        print_report(&report, json)?;

        if let Err(e) = report.ensure_matched() {
            error!(kind = %report.kind, "{e}");
            failures.push(format!("{}: {e}", report.kind));
        }
    }

    match failures.len() {
        0 => {
            info!(flows = scenarios.len(), "all flows recovered their numeral");
            Ok(())
        }
        1 => bail!("{}", failures[0]),
        n => bail!("{n} flows failed:\n{}", failures.join("\n")),
    }
}

fn print_report(report: &FlowReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    match &report.matched {
        Some(found) => println!(
            "{}: found {} in OCR output ({} ms)",
            report.kind, found.matched, report.duration_ms
        ),
        None => {
            println!(
                "{}: {} not found ({} ms). OCR output:",
                report.kind, report.expected, report.duration_ms
            );
            println!("{}", report.ocr_text.trim_end());
        }
    }
    Ok(())
}

fn doctor(probe: &Probe, json: bool) -> anyhow::Result<()> {
    let tools = [
        (probe.ocr().tool(), probe.ocr().version()),
        (probe.rasterizer().tool(), probe.rasterizer().version()),
    ];

    let mut problems = Vec::new();
    let mut entries = Vec::new();
    for (tool, result) in tools {
        match result {
            Ok(version) => {
                if json {
                    entries.push(serde_json::json!({
                        "tool": tool.name(),
                        "program": tool.program(),
                        "version": version,
                    }));
                } else {
                    println!("{} ({}): {}", tool.name(), tool.program(), version);
                }
            }
            Err(e) => problems.push(e.to_string()),
        }
    }

    if json && !entries.is_empty() {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }

    if !problems.is_empty() {
        bail!("{}", problems.join("\n"));
    }
    Ok(())
}
