//! Solve command - Compute and persist a policy

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};

use super::parse_initial;
use crate::{
    adapters::{FileFormat, JsonRepository, MsgPackRepository},
    cli::output::{create_spinner, format_number, print_kv, print_section},
    export::PolicyCsvExporter,
    ports::Repository,
    solver::{SolverConfig, solve, solve_classified},
};

/// Which policy to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyMode {
    /// Set of optimal moves per state
    Optimal,
    /// Win/Draw/Lose classification of every legal move
    Classified,
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Msgpack,
    /// `board,win,draw,lose` rows; classified mode only
    Csv,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Self {
        if path.extension().and_then(|ext| ext.to_str()) == Some("csv") {
            return OutputFormat::Csv;
        }
        match FileFormat::from_path(path) {
            FileFormat::Json => OutputFormat::Json,
            FileFormat::MsgPack => OutputFormat::Msgpack,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Solve every reachable state and write the policy")]
pub struct SolveArgs {
    /// Output file
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Policy to compute
    #[arg(long, value_enum, default_value = "optimal")]
    pub mode: PolicyMode,

    /// Output format (defaults to the output file's extension)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Board to solve from (defaults to the empty board)
    #[arg(long)]
    pub initial: Option<String>,

    /// Reduce the memo table under board symmetries
    #[arg(long)]
    pub symmetry: bool,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_path(&args.output));
    let initial = parse_initial(args.initial.as_deref())?;
    let config = SolverConfig {
        symmetry: args.symmetry,
    };

    let spinner = create_spinner("Solving...")?;
    let states = match args.mode {
        PolicyMode::Optimal => {
            let policy = solve(&initial, &config)?;
            match format {
                OutputFormat::Json => JsonRepository.save(&policy, &args.output)?,
                OutputFormat::Msgpack => MsgPackRepository.save(&policy, &args.output)?,
                OutputFormat::Csv => {
                    spinner.finish_and_clear();
                    bail!("CSV output requires --mode classified");
                }
            }
            policy.len()
        }
        PolicyMode::Classified => {
            let policy = solve_classified(&initial, &config)?;
            match format {
                OutputFormat::Json => JsonRepository.save(&policy, &args.output)?,
                OutputFormat::Msgpack => MsgPackRepository.save(&policy, &args.output)?,
                OutputFormat::Csv => PolicyCsvExporter::export(&policy, &args.output)?,
            }
            policy.len()
        }
    };
    spinner.finish_and_clear();

    print_section("Solve");
    print_kv("Initial board", &initial.key());
    print_kv("Mode", &format!("{:?}", args.mode));
    print_kv("Symmetry", &args.symmetry.to_string());
    print_kv("States", &format_number(states));
    print_kv("Output", &args.output.display().to_string());
    Ok(())
}
