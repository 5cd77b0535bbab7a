use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use regime_cli::input::RequestArgs;
use regime_cli::{logging, render};
use regime_core::{RegimeConfig, TaxEngine};
use regime_data::{config_loader, scenario_loader};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compares the tax burden of Kazakhstan business tax regimes.
///
/// Either describe one business with the request flags, or pass a CSV file
/// of scenarios with `--scenarios`.
#[derive(Debug, Parser)]
#[command(name = "regime-calc", version)]
struct Cli {
    /// TOML file overriding the default rates and ceilings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV file of scenarios; the request flags are ignored when given.
    #[arg(long)]
    scenarios: Option<PathBuf>,

    #[command(flatten)]
    request: RequestArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Append log output to this file as well as stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&cli.log_level, cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => config_loader::load_config_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RegimeConfig::default(),
    };
    let engine = TaxEngine::new(config).context("invalid regime configuration")?;

    let requests = match &cli.scenarios {
        Some(path) => scenario_loader::load_from_file(path)
            .with_context(|| format!("failed to load scenarios from {}", path.display()))?
            .into_iter()
            .map(|scenario| (scenario.name, scenario.request))
            .collect(),
        None => vec![("request".to_string(), cli.request.into_request()?)],
    };
    debug!(count = requests.len(), "comparing scenarios");

    let reports = requests
        .into_iter()
        .map(|(name, request)| {
            let report = engine
                .try_compare(&request)
                .with_context(|| format!("invalid amounts in scenario '{name}'"))?;
            info!(
                scenario = name.as_str(),
                recommended = report.recommended.map(|kind| kind.as_str()),
                "scenario compared"
            );
            Ok((name, report))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    match cli.format {
        OutputFormat::Text => {
            let text: Vec<String> = reports
                .iter()
                .map(|(name, report)| render::render_report(name, report))
                .collect();
            print!("{}", text.join("\n"));
        }
        OutputFormat::Json => {
            println!("{}", render::render_json(&reports)?);
        }
    }

    Ok(())
}
