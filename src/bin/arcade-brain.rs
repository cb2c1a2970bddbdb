//! arcade-brain CLI - Q-learning agent for an external game process
//!
//! This CLI provides:
//! - `run`: drive a live game over the file exchange channel
//! - `inspect`: show what a saved table has learned

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arcade-brain")]
#[command(version, about = "Tabular Q-learning agent for an external game process", long_about = None)]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent: bootstrap, then learn from the game forever
    Run(Box<arcade_brain::cli::commands::run::RunArgs>),

    /// Inspect a saved value table
    Inspect(arcade_brain::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    arcade_brain::cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => arcade_brain::cli::commands::run::execute(*args),
        Commands::Inspect(args) => arcade_brain::cli::commands::inspect::execute(args),
    }
}
