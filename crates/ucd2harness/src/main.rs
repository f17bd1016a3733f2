//! ucd2harness - convert UrbanCode Deploy exports into Harness YAML.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use ucd2harness_common::DeploymentType;
use ucd2harness_converter::{convert, ConverterConfig, InputSelection, MatchMode, ReportFormat};

#[derive(Parser)]
#[command(name = "ucd2harness")]
#[command(
    author,
    version,
    about = "Convert UrbanCode Deploy application exports into Harness services and pipelines"
)]
struct Cli {
    /// UCD export file (repeatable)
    #[arg(short, long = "input")]
    inputs: Vec<PathBuf>,

    /// Directory scanned for *.json exports
    #[arg(long)]
    input_dir: Vec<PathBuf>,

    /// Scan input directories recursively
    #[arg(long)]
    recursive: bool,

    /// Output directory
    #[arg(short, long, default_value = "harness_out")]
    out: PathBuf,

    /// Harness organization identifier
    #[arg(long, default_value = "default")]
    org: String,

    /// Harness project identifier
    #[arg(long, default_value = "default_project")]
    project: String,

    /// Template registry (defaults to .harness/template-registry.yaml)
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Output grouping (file, application, none)
    #[arg(long, default_value = "none")]
    group_by: String,

    /// Inject only the first matching template per component
    #[arg(long)]
    first_match: bool,

    /// Document format (yaml, json)
    #[arg(long, default_value = "yaml")]
    format: String,

    /// Deployment type when no keyword matches (Ssh, WinRm, TAS, Kubernetes, CustomDeployment)
    #[arg(long, default_value = "Ssh")]
    fallback_type: String,

    /// Summary format (text, json)
    #[arg(long, default_value = "text")]
    summary: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let fallback_type: DeploymentType = cli.fallback_type.parse()?;
    let summary: ReportFormat = cli.summary.parse()?;
    let config = ConverterConfig {
        out_dir: cli.out,
        org_identifier: cli.org,
        project_identifier: cli.project,
        registry_path: cli.registry,
        grouping: cli.group_by.parse()?,
        match_mode: if cli.first_match {
            MatchMode::FirstMatch
        } else {
            MatchMode::All
        },
        format: cli.format.parse()?,
        fallback_type,
    };
    let selection = InputSelection {
        files: cli.inputs,
        dirs: cli.input_dir,
        recursive: cli.recursive,
    };

    let out_dir = config.out_dir.clone();
    let report = convert(config, &selection)
        .with_context(|| format!("Conversion into {} failed", out_dir.display()))?;

    print!("{}", report.render(summary)?);

    info!("Done. Harness files written under {}", out_dir.display());
    Ok(())
}
