//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::chart_svg;
use crate::adapters::csv_ratio_adapter::CsvRatioAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::sequence_adapter::SequenceAdapter;
use crate::adapters::snapshot_csv;
use crate::adapters::text_report::TextReportAdapter;
use crate::domain::config_validation::validate_simulation_config;
use crate::domain::error::RatioError;
use crate::domain::holdings::Holdings;
use crate::domain::simulator::{self, SimulationParams};
use crate::domain::summary::SimulationSummary;
use crate::domain::valuation::Prices;
use crate::ports::config_port::ConfigPort;
use crate::ports::ratio_port::RatioSource;
use crate::ports::report_port::{ReportPort, SimulationReport};

#[derive(Parser, Debug)]
#[command(name = "ratiotrader", about = "Gold/silver ratio rebalancing simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a rebalancing simulation
    Simulate(SimulateArgs),
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Flags override the config file; the config file overrides built-in defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct SimulateArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// CSV file whose first column holds the ratio sequence
    #[arg(short, long)]
    pub ratios: Option<PathBuf>,
    /// Comma-separated ratio sequence, e.g. "80,85,90"
    #[arg(long)]
    pub sequence: Option<String>,
    /// Treat the first CSV row as data rather than a header
    #[arg(long)]
    pub no_header: bool,
    #[arg(long)]
    pub gold: Option<f64>,
    #[arg(long)]
    pub silver: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub high: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub low: Option<f64>,
    #[arg(long)]
    pub trade_pct: Option<f64>,
    #[arg(long)]
    pub gold_price: Option<f64>,
    #[arg(long)]
    pub silver_price: Option<f64>,
    /// Report file; printed to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long)]
    pub snapshots: Option<PathBuf>,
    #[arg(long)]
    pub chart: Option<PathBuf>,
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Simulate(args) => run_simulate(&args),
        Command::Validate { config } => run_validate(&config),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, RatioError> {
    match path {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading config");
            FileConfigAdapter::from_file(p)
        }
        None => FileConfigAdapter::from_string(""),
    }
}

pub fn build_holdings(args: &SimulateArgs, config: &dyn ConfigPort) -> Result<Holdings, RatioError> {
    let gold = args
        .gold
        .unwrap_or_else(|| config.get_double("portfolio", "gold", 10.0));
    let silver = args
        .silver
        .unwrap_or_else(|| config.get_double("portfolio", "silver", 800.0));
    Holdings::checked(gold, silver)
}

pub fn build_params(
    args: &SimulateArgs,
    config: &dyn ConfigPort,
) -> Result<SimulationParams, RatioError> {
    let defaults = SimulationParams::default();
    let params = SimulationParams {
        threshold_high: args.high.unwrap_or_else(|| {
            config.get_double("strategy", "threshold_high", defaults.threshold_high)
        }),
        threshold_low: args.low.unwrap_or_else(|| {
            config.get_double("strategy", "threshold_low", defaults.threshold_low)
        }),
        trade_percent: args.trade_pct.unwrap_or_else(|| {
            config.get_double("strategy", "trade_percent", defaults.trade_percent)
        }),
    };
    params.validate()?;
    Ok(params)
}

/// Prices are only resolved when a flag or the `[valuation]` section asks for them.
pub fn build_prices(
    args: &SimulateArgs,
    config: &dyn ConfigPort,
) -> Result<Option<Prices>, RatioError> {
    let configured = config.get_string("valuation", "gold_price").is_some()
        || config.get_string("valuation", "silver_price").is_some();
    if args.gold_price.is_none() && args.silver_price.is_none() && !configured {
        return Ok(None);
    }

    let defaults = Prices::default();
    let gold = args
        .gold_price
        .unwrap_or_else(|| config.get_double("valuation", "gold_price", defaults.gold));
    let silver = args
        .silver_price
        .unwrap_or_else(|| config.get_double("valuation", "silver_price", defaults.silver));
    Prices::new(gold, silver).map(Some)
}

/// Pick the ratio source: `--ratios`, `--sequence`, `[input] ratios_file`,
/// `[input] sequence`, then the built-in sequence.
pub fn resolve_ratio_source(
    args: &SimulateArgs,
    config: &dyn ConfigPort,
) -> Box<dyn RatioSource> {
    let has_header = !args.no_header && config.get_bool("input", "has_header", true);
    let delimiter = config
        .get_string("input", "delimiter")
        .and_then(|d| d.chars().next())
        .unwrap_or(',');

    if let Some(path) = &args.ratios {
        return Box::new(CsvRatioAdapter::new(path.clone()).with_header(has_header));
    }
    if let Some(seq) = &args.sequence {
        return Box::new(SequenceAdapter::new(seq.clone()).with_delimiter(delimiter));
    }
    if let Some(file) = config.get_string("input", "ratios_file") {
        let path = relative_to_config(args.config.as_deref(), Path::new(&file));
        return Box::new(CsvRatioAdapter::new(path).with_header(has_header));
    }
    if let Some(seq) = config.get_string("input", "sequence") {
        return Box::new(SequenceAdapter::new(seq).with_delimiter(delimiter));
    }
    Box::new(SequenceAdapter::default())
}

fn relative_to_config(config_path: Option<&Path>, file: &Path) -> PathBuf {
    if file.is_absolute() {
        return file.to_path_buf();
    }
    match config_path.and_then(Path::parent) {
        Some(dir) => dir.join(file),
        None => file.to_path_buf(),
    }
}

/// Flag paths are taken as given; `[output]` paths resolve against the config file's directory.
fn output_path(
    flag: Option<&PathBuf>,
    config: &dyn ConfigPort,
    config_path: Option<&Path>,
    key: &str,
) -> Option<PathBuf> {
    flag.cloned().or_else(|| {
        config
            .get_string("output", key)
            .map(|file| relative_to_config(config_path, Path::new(&file)))
    })
}

/// Run the whole pipeline.
///
/// Returns the rendered report when no report path is configured, `None` once
/// it has been written to disk.
pub fn execute_simulation(args: &SimulateArgs) -> Result<Option<String>, RatioError> {
    let config = load_config(args.config.as_ref())?;
    validate_simulation_config(&config)?;
    let config_path = args.config.as_deref();

    let initial = build_holdings(args, &config)?;
    let params = build_params(args, &config)?;
    let prices = build_prices(args, &config)?;

    let source = resolve_ratio_source(args, &config);
    let ratios = source.load_ratios()?;
    tracing::info!(source = %source.describe(), count = ratios.len(), "ratios loaded");

    let result = simulator::simulate(initial, &params, &ratios)?;
    let summary = SimulationSummary::compute(&result);
    tracing::info!(
        steps = summary.steps,
        trades = summary.total_trades(),
        "simulation complete"
    );

    if let Some(path) = output_path(args.snapshots.as_ref(), &config, config_path, "snapshots") {
        snapshot_csv::write_snapshots_to_path(&path, &result.snapshots)?;
        tracing::info!(path = %path.display(), "snapshots written");
    }

    if let Some(path) = output_path(args.chart.as_ref(), &config, config_path, "chart") {
        let svg = chart_svg::generate_total_units_svg(&result.snapshots);
        if svg.is_empty() {
            tracing::warn!("no snapshots to chart; skipping {}", path.display());
        } else {
            fs::write(&path, svg)?;
            tracing::info!(path = %path.display(), "chart written");
        }
    }

    let report = SimulationReport {
        params: &params,
        result: &result,
        summary: &summary,
        prices,
    };
    let adapter = TextReportAdapter;

    match output_path(args.output.as_ref(), &config, config_path, "report") {
        Some(path) => {
            adapter.write(&report, &path)?;
            eprintln!("Report written to: {}", path.display());
            Ok(None)
        }
        None => adapter.render(&report).map(Some),
    }
}

fn run_simulate(args: &SimulateArgs) -> Result<(), RatioError> {
    if let Some(text) = execute_simulation(args)? {
        print!("{text}");
    }
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> Result<(), RatioError> {
    eprintln!("Validating config: {}", config_path.display());
    let config = load_config(Some(config_path))?;
    validate_simulation_config(&config)?;

    let args = SimulateArgs {
        config: Some(config_path.clone()),
        ..SimulateArgs::default()
    };
    let params = build_params(&args, &config)?;
    let holdings = build_holdings(&args, &config)?;

    eprintln!("  gold:           {} oz", holdings.gold);
    eprintln!("  silver:         {} oz", holdings.silver);
    eprintln!("  threshold_high: {}", params.threshold_high);
    eprintln!("  threshold_low:  {}", params.threshold_low);
    eprintln!("  trade_percent:  {}%", params.trade_percent);
    if params.thresholds_degenerate() {
        tracing::warn!("threshold_low >= threshold_high; overlapping ratios trade as high-ratio");
    }

    eprintln!("\nConfiguration is valid.");
    Ok(())
}
