//! Acceptance suite runner.
//!
//! Reads the forge coordinates from the environment, loads the feature
//! files, and executes every scenario in seeded random order. Exits with
//! status 1 on configuration errors or any failed scenario.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use forge_acceptance::{AcceptanceWorld, registry};
use forge_api::ApiClient;
use forge_config::Settings;
use forge_harness::{RunReport, ScenarioRunner, ScenarioStatus, load_features, wall_clock_seed};

/// Acceptance tests for a forge repository service
#[derive(Parser, Debug)]
#[command(name = "forge-acceptance")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the .feature files
    #[arg(long, default_value = "features")]
    features: PathBuf,

    /// Pin the scenario shuffle seed (defaults to wall-clock time)
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Errors that abort the run before any scenario executes
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] forge_config::Error),

    #[error(transparent)]
    Api(#[from] forge_api::Error),

    #[error(transparent)]
    Harness(#[from] forge_harness::Error),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(report) => {
            print_report(&report);
            if !report.success() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<RunReport, CliError> {
    let settings = Arc::new(Settings::from_env()?);
    let api = ApiClient::new(&settings)?;
    let features = load_features(&cli.features)?;
    let seed = cli.seed.unwrap_or_else(wall_clock_seed);

    let runner = ScenarioRunner::new(registry(), {
        let settings = settings.clone();
        let api = api.clone();
        move || AcceptanceWorld::new(settings.clone(), api.clone())
    });

    Ok(runner.run(&features, seed).await)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();
}

fn print_report(report: &RunReport) {
    for outcome in &report.outcomes {
        let label = format!("{} / {}", outcome.feature, outcome.scenario);
        match &outcome.status {
            ScenarioStatus::Passed => {
                println!("{} {label}", "ok".green().bold());
            }
            ScenarioStatus::Failed { step, error } => {
                println!("{} {label} at \"{step}\": {error}", "failed".red().bold());
            }
            ScenarioStatus::Undefined { step } => {
                println!("{} {label}: no step matches \"{step}\"", "undefined".yellow().bold());
            }
        }
    }

    println!();
    println!(
        "{} passed, {} failed (seed {})",
        report.passed(),
        report.failed(),
        report.seed
    );
}
