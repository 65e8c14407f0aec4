//! Pipeline command - Solve or load a policy, induce rules, report

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;

use super::parse_initial;
use crate::{
    adapters::save_file,
    cli::{
        config::PipelineConfig,
        output::{format_number, print_kv, print_report, print_section},
    },
    pipeline::{JsonlObserver, PassLimitObserver, PolicySource, ProgressObserver, run},
    ports::ObserverSet,
    topology::summarize_rules,
};

#[derive(Parser, Debug)]
#[command(about = "Solve (or load) a policy and induce causal rules from it")]
pub struct PipelineArgs {
    /// Load the optimal-move policy from a JSON or MessagePack file instead of solving
    #[arg(long, conflicts_with_all = ["initial", "symmetry"])]
    pub policy: Option<PathBuf>,

    /// Board to solve from when no policy file is given (defaults to the empty board)
    #[arg(long)]
    pub initial: Option<String>,

    /// Largest number of cause cells to try
    #[arg(long)]
    pub max_cause_size: Option<usize>,

    /// Minimum number of evidence states per rule
    #[arg(long)]
    pub min_support: Option<usize>,

    /// Reduce the solver's memo table under board symmetries
    #[arg(long)]
    pub symmetry: bool,

    /// Evaluate induction passes on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the solved policy (format by extension)
    #[arg(long)]
    pub policy_out: Option<PathBuf>,

    /// Write the rule list (format by extension)
    #[arg(long)]
    pub rules_out: Option<PathBuf>,

    /// Stop induction after this many passes in total
    #[arg(long)]
    pub max_passes: Option<usize>,

    /// Write one JSON line per induction pass
    #[arg(long)]
    pub pass_log: Option<PathBuf>,

    /// Classify the geometry of the accepted rules
    #[arg(long)]
    pub topology: bool,

    /// Print at most this many rules
    #[arg(long)]
    pub limit: Option<usize>,

    /// Hide the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}

impl PipelineArgs {
    fn resolve_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(max_cause_size) = self.max_cause_size {
            config.induction.max_cause_size = max_cause_size;
        }
        if let Some(min_support) = self.min_support {
            config.induction.min_support = min_support;
        }
        if self.symmetry {
            config.solver.symmetry = true;
        }
        if self.sequential {
            config.induction.parallel = false;
        }
        if self.no_progress {
            config.progress = false;
        }
        config.induction.validate()?;
        ensure!(self.max_passes != Some(0), "--max-passes must be at least 1");
        Ok(config)
    }
}

pub fn execute(args: PipelineArgs) -> Result<()> {
    let config = args.resolve_config()?;

    let source = match &args.policy {
        Some(path) => PolicySource::File(path.clone()),
        None => PolicySource::Solve {
            initial: parse_initial(args.initial.as_deref())?,
            config: config.solver.clone(),
        },
    };

    let mut observers = ObserverSet::new();
    if config.progress {
        observers = observers.with(ProgressObserver::new());
    }
    if let Some(path) = &args.pass_log {
        observers = observers.with(
            JsonlObserver::new(path)
                .with_context(|| format!("failed to create pass log {}", path.display()))?,
        );
    }

    if let Some(limit) = args.max_passes {
        observers = observers.with(PassLimitObserver::new(limit));
    }

    let output = run(&source, &config.induction, &mut observers)?;

    print_report(&output.report, args.limit);

    if args.topology {
        print_section("Rule Topology");
        for (signature, count) in summarize_rules(&output.report.rules)? {
            print_kv(signature.as_str(), &format_number(count));
        }
    }

    if let Some(path) = &args.policy_out {
        save_file(&output.policy, path)?;
        println!("\nPolicy written to {}", path.display());
    }
    if let Some(path) = &args.rules_out {
        save_file(&output.report.rules, path)?;
        println!("Rules written to {}", path.display());
    }

    Ok(())
}
