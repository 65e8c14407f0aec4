//! ttt-rules CLI - Solve Tic-Tac-Toe and induce the rules behind optimal play
//!
//! This CLI provides a unified interface for:
//! - Solving every reachable state into an optimal-move or Win/Draw/Lose policy
//! - Inducing minimal causal rules from a solved or persisted policy
//! - Tallying the line topology of policies and rules
//!
//! Set `RUST_LOG=info` (or `debug` for every accepted rule) for log output.

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ttt-rules")]
#[command(version, about = "Tic-Tac-Toe policy solver and causal rule induction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve (or load) a policy, induce rules and report
    Pipeline(Box<ttt_rules::cli::commands::pipeline::PipelineArgs>),

    /// Solve every reachable state and write the policy
    Solve(ttt_rules::cli::commands::solve::SolveArgs),

    /// Tally line signatures over a Win/Draw/Lose policy
    Topology(ttt_rules::cli::commands::topology::TopologyArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pipeline(args) => ttt_rules::cli::commands::pipeline::execute(*args),
        Commands::Solve(args) => ttt_rules::cli::commands::solve::execute(args),
        Commands::Topology(args) => ttt_rules::cli::commands::topology::execute(args),
    }
}
