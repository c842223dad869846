//! Brain CLI - run activity-group schedulers against a scripted arena.
//!
//! - `brain simulate` - run a scenario and print the behavior trace
//! - `brain config` - print the default scenario as YAML

mod arena;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ScenarioConfig;

#[derive(Parser)]
#[command(name = "brain")]
#[command(about = "Activity-group behavior scheduler", version)]
struct Cli {
    /// Verbose output (scheduler transitions)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print every behavior transition
    Simulate {
        /// Scenario file (YAML); built-in defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the number of ticks
        #[arg(long)]
        ticks: Option<u64>,

        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default scenario
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Simulate {
            config,
            ticks,
            json,
        }) => simulate(config, ticks, json),
        Some(Commands::Config) => {
            print!("{}", ScenarioConfig::default().to_yaml()?);
            Ok(())
        }
        None => {
            println!("Usage: brain <COMMAND>");
            println!();
            println!("Commands:");
            println!("  simulate  Run a scenario");
            println!("  config    Print the default scenario");
            println!();
            println!("Run 'brain --help' for more information.");
            Ok(())
        }
    }
}

fn simulate(path: Option<PathBuf>, ticks: Option<u64>, json: bool) -> Result<()> {
    let mut config = match path {
        Some(path) => ScenarioConfig::load(&path)?,
        None => ScenarioConfig::default(),
    };
    if let Some(ticks) = ticks {
        config.ticks = ticks;
    }

    tracing::info!(ticks = config.ticks, seed = config.seed, "Starting scenario");
    let (_, trace) = arena::run(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }

    for event in &trace.events {
        println!(
            "{:>5}  {:<22} {}#{}  {}",
            event.tick, event.tag, event.a, event.b, event.detail
        );
    }
    Ok(())
}
