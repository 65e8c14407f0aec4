//! Topology command - Tally line signatures over a classified policy

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::parse_initial;
use crate::{
    adapters::{load_file, load_policy_file},
    cli::output::{format_number, print_kv, print_section, print_subsection},
    induction::Rule,
    policy::{MoveClassification, OutcomeCategory, Policy},
    solver::{SolverConfig, solve_classified},
    topology::{Signature, StoneContext, summarize_rules, tally},
};

#[derive(Parser, Debug)]
#[command(about = "Tally line signatures over a Win/Draw/Lose policy")]
pub struct TopologyArgs {
    /// Classified policy file (JSON or MessagePack); solved when omitted
    #[arg(long, conflicts_with_all = ["initial", "symmetry"])]
    pub policy: Option<PathBuf>,

    /// Board to solve from when no policy file is given
    #[arg(long)]
    pub initial: Option<String>,

    /// Reduce the solver's memo table under board symmetries
    #[arg(long)]
    pub symmetry: bool,

    /// Also summarize a rule list written by `pipeline --rules-out`
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

pub fn execute(args: TopologyArgs) -> Result<()> {
    let policy: Policy<MoveClassification> = match &args.policy {
        Some(path) => load_policy_file(path)?,
        None => solve_classified(
            &parse_initial(args.initial.as_deref())?,
            &SolverConfig {
                symmetry: args.symmetry,
            },
        )?,
    };

    let result = tally(&policy);

    print_section("Topology Tally");
    print_kv("States", &format_number(policy.len()));
    print_kv("Categories counted", &format_number(result.states()));

    for context in [StoneContext::Mover, StoneContext::Opponent] {
        for category in OutcomeCategory::ALL {
            let total = result.total(context, category);
            print_subsection(&format!(
                "{category} moves, {context} stone pairs ({})",
                format_number(total)
            ));
            for signature in Signature::ALL {
                let count = result.count(context, category, signature);
                if count > 0 {
                    print_kv(signature.as_str(), &format_number(count));
                }
            }
        }
    }

    if let Some(path) = &args.rules {
        let rules: Vec<Rule> = load_file(path)?;
        print_section("Rule Topology");
        for (signature, count) in summarize_rules(&rules)? {
            print_kv(signature.as_str(), &format_number(count));
        }
    }

    Ok(())
}
