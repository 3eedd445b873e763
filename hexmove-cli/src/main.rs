//! HEXMOVE CLI - Command-line interface
//!
//! Commands:
//! - step: Cost of a single step, zone of control included
//! - zoc: Whether a step is slowed by zone of control
//! - path: Walk a hex sequence turn by turn
//! - rules: Write the stock movement rules as JSON

mod path_cmd;
mod session;
mod step_cmd;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hexmove_core::MovementRules;

#[derive(Parser)]
#[command(name = "hexmove")]
#[command(about = "Movement costs and zone of control on hex maps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one step
    Step(step_cmd::StepArgs),
    /// Check zone of control for one step
    Zoc(step_cmd::StepArgs),
    /// Walk a path turn by turn
    Path(path_cmd::PathArgs),
    /// Write the stock rules to a file
    Rules {
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Use the combined promotion model
        #[arg(long)]
        combined: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Step(args) => step_cmd::run(args),
        Commands::Zoc(args) => step_cmd::run_zoc(args),
        Commands::Path(args) => path_cmd::run(args),
        Commands::Rules { output, combined } => {
            let rules = if combined {
                MovementRules::combined()
            } else {
                MovementRules::default()
            };
            rules
                .save(&output)
                .with_context(|| format!("Failed to write rules: {}", output.display()))?;
            println!("Wrote rules to {}", output.display());
            Ok(())
        }
    }
}
