//! Headless Hamlet scenario runner.
//!
//! Replays a scenario against the cell registry without a renderer and prints
//! a summary plus an ASCII map of the result.
//!
//! # Usage
//!
//! ```bash
//! # Run a scenario
//! cargo run -p hamlet_headless -- run --scenario crates/hamlet_headless/scenarios/village.ron
//!
//! # Summary only, debug logging
//! cargo run -p hamlet_headless -- --verbose run --scenario village.ron --no-map
//!
//! # Registry traces only
//! RUST_LOG=hamlet_core=trace cargo run -p hamlet_headless -- run --scenario village.ron
//! ```
//!
//! Output (stdout): summary and map
//! Logs (stderr): Debug information

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hamlet_headless::{
    ascii_visualizer::{render_ascii, AsciiConfig},
    runner::ScenarioRunner,
    scenario::Scenario,
};

#[derive(Parser)]
#[command(name = "hamlet_headless")]
#[command(about = "Headless cell registry runner for scripted placement sessions")]
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
    /// Run a scenario file
    Run {
        /// Scenario file to load
        #[arg(short, long)]
        scenario: PathBuf,

        /// Skip the ASCII map
        #[arg(long)]
        no_map: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for the report).
    // RUST_LOG wins over --verbose when set.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

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
            no_map,
            no_color,
        } => cmd_run(scenario, no_map, no_color),
    }
}

/// Run a single scenario
fn cmd_run(path: PathBuf, no_map: bool, no_color: bool) -> ExitCode {
    let scenario = match Scenario::load(&path) {
        Ok(scenario) => scenario,
        Err(e) => {
            tracing::error!("Failed to load scenario {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    println!("Scenario: {}", scenario.name);
    if !scenario.description.is_empty() {
        println!("  {}", scenario.description);
    }

    let mut runner = match ScenarioRunner::new(scenario) {
        Ok(runner) => runner,
        Err(e) => {
            tracing::error!("Invalid scenario config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let report = match runner.run() {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Scenario aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!("=== Results ===");
    println!("Placed:        {}", report.placed);
    println!("Rejected:      {}", report.rejected);
    println!("Unaffordable:  {}", report.unaffordable);
    println!("Destroyed:     {}", report.destroyed);
    println!("Missed:        {}", report.missed);
    println!("Frames:        {}", report.frames);
    println!("Notifications: {}", report.notifications);
    println!("Orders queued: {}", runner.orders().len());

    if !no_map {
        let config = AsciiConfig {
            use_color: !no_color,
            ..AsciiConfig::default()
        };
        println!();
        print!("{}", render_ascii(runner.registry(), &config));
    }

    runner.finish();
    ExitCode::SUCCESS
}
