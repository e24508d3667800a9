//! Headless mace scenario runner.
//!
//! # Usage
//!
//! ```bash
//! # Run a single scenario
//! cargo run -p mace_headless -- run --scenario scenarios/basic_smash.ron
//!
//! # Run a scenario with different tuning
//! cargo run -p mace_headless -- run --scenario scenarios/basic_smash.ron --config tuning.ron
//!
//! # Run every scenario in a directory
//! cargo run -p mace_headless -- batch --dir scenarios --output results/batch.json
//!
//! # Check tuning and scenario files without running them
//! cargo run -p mace_headless -- validate --config tuning.ron --scenario scenarios/basic_smash.ron
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mace_headless::{
    batch::{run_batch, BatchConfig},
    config_loader::load_config,
    runner::run_scenario,
    scenario::Scenario,
};

#[derive(Parser)]
#[command(name = "mace_headless")]
#[command(about = "Headless mace and wind charge scenario runner")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single scenario and print its report
    Run {
        /// Scenario file to load
        #[arg(short, long)]
        scenario: PathBuf,

        /// Tuning file overriding the scenario's own
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run every scenario in a directory
    Batch {
        /// Directory of `*.ron` scenarios
        #[arg(short, long, default_value = "scenarios")]
        dir: PathBuf,

        /// Maximum parallel scenarios (0 = auto)
        #[arg(short, long, default_value = "0")]
        parallel: u32,

        /// Write all results to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check tuning and scenario files without running them
    Validate {
        /// Tuning file to check
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scenario file to check
        #[arg(short, long)]
        scenario: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for reports)
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(filter)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            config,
            output,
        } => cmd_run(scenario, config, output),
        Commands::Batch {
            dir,
            parallel,
            output,
        } => cmd_batch(dir, parallel, output),
        Commands::Validate { config, scenario } => cmd_validate(config, scenario),
    }
}

/// Run one scenario
fn cmd_run(path: PathBuf, config: Option<PathBuf>, output: Option<PathBuf>) {
    let mut scenario = match Scenario::load(&path) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("FATAL: {e}");
            std::process::exit(1);
        }
    };

    if let Some(config_path) = config {
        match load_config(&config_path) {
            Ok(tuning) => scenario.config = Some(tuning),
            Err(e) => {
                eprintln!("FATAL: {e}");
                std::process::exit(1);
            }
        }
    }

    tracing::info!("Running scenario '{}' from {:?}", scenario.name, path);

    let report = match run_scenario(&scenario) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Scenario '{}' failed: {e}", scenario.name);
            std::process::exit(1);
        }
    };

    let json = match report.to_json() {
        Ok(json) => json,
        Err(e) => {
            eprintln!("FATAL: Failed to encode report: {e}");
            std::process::exit(1);
        }
    };

    match output {
        Some(out) => {
            if let Err(e) = std::fs::write(&out, json) {
                eprintln!("FATAL: Failed to write report: {e}");
                std::process::exit(1);
            }
            eprintln!("Report saved to: {}", out.display());
        }
        None => println!("{json}"),
    }
}

/// Run a directory of scenarios
fn cmd_batch(dir: PathBuf, parallel: u32, output: Option<PathBuf>) {
    let results = match run_batch(BatchConfig::new(dir).with_parallel(parallel)) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("FATAL: {e}");
            std::process::exit(1);
        }
    };

    match &output {
        Some(path) => {
            if let Err(e) = results.save(path) {
                eprintln!("FATAL: Failed to save results: {e}");
                std::process::exit(1);
            }
        }
        None => {
            for report in &results.reports {
                match serde_json::to_string(report) {
                    Ok(line) => println!("{line}"),
                    Err(e) => eprintln!("Failed to encode report '{}': {e}", report.name),
                }
            }
        }
    }

    eprintln!("\n{}", "=".repeat(50));
    eprintln!("BATCH COMPLETE");
    eprintln!("{}", "=".repeat(50));
    eprintln!("Scenarios run: {}", results.reports.len());
    eprintln!("Duration: {:.2}s", results.duration_seconds);
    if !results.errors.is_empty() {
        eprintln!("\nSCENARIO FAILURES:");
        for error in &results.errors {
            eprintln!("  {}: {}", error.path.display(), error.message);
        }
    }
    if let Some(path) = output {
        eprintln!("\nResults saved to: {}", path.display());
    }

    if !results.errors.is_empty() {
        std::process::exit(1);
    }
}

/// Check files without running anything
fn cmd_validate(config: Option<PathBuf>, scenario: Option<PathBuf>) {
    let mut failed = false;

    if let Some(path) = config {
        match load_config(&path) {
            Ok(_) => eprintln!("{}: ok", path.display()),
            Err(e) => {
                eprintln!("{e}");
                failed = true;
            }
        }
    }

    if let Some(path) = scenario {
        match Scenario::load(&path) {
            Ok(scenario) => {
                let problems = scenario.validate();
                if problems.is_empty() {
                    eprintln!("{}: ok", path.display());
                } else {
                    for problem in problems {
                        eprintln!("{}: {problem}", path.display());
                    }
                    failed = true;
                }
            }
            Err(e) => {
                eprintln!("{e}");
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}
