//! # Erlang CLI
//!
//! Command-line front end for the Erlang-B engine. Parses and validates the
//! user's numbers, runs one calculation (or a JSON batch), and prints the
//! result as text or JSON.
//!
//! ```text
//! erlang blocking --channels 18 --traffic 10
//! erlang channels --traffic 10 --gos 0.01
//! erlang traffic --channels 15 --gos 0.01 --json
//! erlang batch items.json
//! ```

mod report;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use erlang_core::calculations::{BlockingInput, ChannelsInput, TrafficInput};
use erlang_core::{load_settings, CalcError, CalcResult, CalculationItem, CalculationOutput, ChannelSearch, SolverSettings};

/// Erlang-B traffic calculator: derive channels, traffic or blocking from the other two
#[derive(Parser, Debug)]
#[command(name = "erlang")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Solver settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ceiling for the channel search
    #[arg(long, global = true)]
    max_channels: Option<u32>,

    /// Blocking tolerance for the traffic search
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    /// Bisection step limit for the traffic search
    #[arg(long, global = true)]
    max_iterations: Option<u32>,

    /// Ceiling for the traffic search, in Erlangs
    #[arg(long, global = true)]
    max_traffic: Option<f64>,

    /// Scan channel counts one by one instead of bisecting
    #[arg(long, global = true)]
    linear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blocking probability for N channels offered A Erlangs
    Blocking {
        /// Number of channels N
        #[arg(short = 'n', long)]
        channels: u32,
        /// Offered traffic A (Erlangs)
        #[arg(short = 'a', long, allow_negative_numbers = true)]
        traffic: f64,
    },
    /// Minimal channels for A Erlangs at a grade of service
    Channels {
        /// Offered traffic A (Erlangs)
        #[arg(short = 'a', long, allow_negative_numbers = true)]
        traffic: f64,
        /// Target blocking probability, 0 to 1
        #[arg(short = 'p', long, allow_negative_numbers = true)]
        gos: f64,
    },
    /// Offered traffic N channels carry at a grade of service
    Traffic {
        /// Number of channels N
        #[arg(short = 'n', long)]
        channels: u32,
        /// Target blocking probability, 0 to 1
        #[arg(short = 'p', long, allow_negative_numbers = true)]
        gos: f64,
    },
    /// Evaluate a JSON array of calculations ("-" reads stdin)
    Batch {
        /// Path to the batch file
        file: PathBuf,
    },
}

/// One line of batch JSON output.
#[derive(Serialize)]
struct BatchEntry<'a> {
    label: &'a str,
    calc_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<CalculationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CalcError>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            if cli.json {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!("{}", json);
                }
            }
            if e.is_input_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> CalcResult<ExitCode> {
    let settings = resolve_settings(cli)?;
    debug!(?settings, "solver settings");

    let item = match &cli.command {
        Command::Blocking { channels, traffic } => CalculationItem::Blocking(BlockingInput {
            label: String::new(),
            channels: *channels,
            traffic_erlangs: *traffic,
        }),
        Command::Channels { traffic, gos } => CalculationItem::Channels(ChannelsInput {
            label: String::new(),
            traffic_erlangs: *traffic,
            target_blocking: *gos,
        }),
        Command::Traffic { channels, gos } => CalculationItem::Traffic(TrafficInput {
            label: String::new(),
            channels: *channels,
            target_blocking: *gos,
        }),
        Command::Batch { file } => return run_batch(file, &settings, cli.json),
    };

    let output = item.evaluate(&settings)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", report::item(&item, &output));
    }
    Ok(ExitCode::SUCCESS)
}

/// Settings file first, then command-line overrides.
fn resolve_settings(cli: &Cli) -> CalcResult<SolverSettings> {
    let mut settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => SolverSettings::default(),
    };

    if let Some(max_channels) = cli.max_channels {
        settings.max_channels = max_channels;
    }
    if let Some(tolerance) = cli.tolerance {
        settings.tolerance = tolerance;
    }
    if let Some(max_iterations) = cli.max_iterations {
        settings.max_iterations = max_iterations;
    }
    if let Some(max_traffic) = cli.max_traffic {
        settings.max_traffic = max_traffic;
    }
    if cli.linear {
        settings.channel_search = ChannelSearch::Linear;
    }

    settings.validate()?;
    Ok(settings)
}

fn read_batch(file: &Path) -> CalcResult<Vec<CalculationItem>> {
    let contents = if file == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CalcError::file_error("read", "<stdin>", e.to_string()))?;
        buf
    } else {
        fs::read_to_string(file)
            .map_err(|e| CalcError::file_error("read", file.display().to_string(), e.to_string()))?
    };

    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid batch JSON in {}: {}", file.display(), e)))
}

/// Evaluate every item; a failing item is reported and the rest still run.
fn run_batch(file: &Path, settings: &SolverSettings, json: bool) -> CalcResult<ExitCode> {
    let items = read_batch(file)?;
    debug!(count = items.len(), "evaluating batch");

    let mut failures = 0usize;
    let mut entries = Vec::with_capacity(items.len());

    for item in &items {
        let outcome = item.evaluate(settings);
        if outcome.is_err() {
            failures += 1;
        }

        if json {
            let (output, error) = match outcome {
                Ok(output) => (Some(output), None),
                Err(e) => (None, Some(e)),
            };
            entries.push(BatchEntry {
                label: item.label(),
                calc_type: item.calc_type(),
                output,
                error,
            });
        } else {
            match outcome {
                Ok(output) => println!("{}\n", report::item(item, &output)),
                Err(e) => println!("{} '{}': Error: {}\n", item.calc_type(), item.label(), e),
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }

    if failures > 0 {
        eprintln!("{} of {} calculations failed", failures, items.len());
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
