//! Output formatting and spinners for the CLI

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    induction::{InductionReport, Rule},
    policy::MoveSet,
    tictactoe::BoardState,
};

/// Create a spinner for long-running tasks
pub fn create_spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a fraction as a percentage
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Print the summary, pass table and rule list of an induction run
pub fn print_report(report: &InductionReport, rule_limit: Option<usize>) {
    print_section("Rule Induction");
    print_kv("Universe states", &format_number(report.universe_size));
    print_kv("Initial pairs", &format_number(report.initial_pairs));
    print_kv("Rules", &format_number(report.rules.len()));
    print_kv("Unexplained pairs", &format_number(report.unexplained_pairs()));
    print_kv("Coverage", &format_percent(report.coverage()));
    if report.cancelled {
        print_kv("Status", "stopped early");
    }

    print_subsection("Rules by cause size");
    for (k, count) in report.rules_by_cause_size() {
        print_kv(&format!("k={k}"), &format_number(count));
    }

    print_subsection("Passes");
    println!(
        "  {:>3} {:>5} {:>10} {:>9} {:>11} {:>12}",
        "k", "pass", "hypotheses", "accepted", "rejected", "pairs left"
    );
    for pass in &report.passes {
        println!(
            "  {:>3} {:>5} {:>10} {:>9} {:>11} {:>12}",
            pass.cause_size,
            pass.pass,
            format_number(pass.hypotheses),
            format_number(pass.accepted),
            format_number(pass.rejected.total()),
            format_number(pass.remaining_pairs)
        );
    }

    print_subsection("Rules");
    print_rules(&report.rules, rule_limit);

    if !report.unexplained.is_empty() {
        print_subsection("Unexplained states");
        print_unexplained(&report.unexplained, rule_limit.unwrap_or(10));
    }
}

fn print_rules(rules: &[Rule], limit: Option<usize>) {
    let shown = limit.unwrap_or(rules.len()).min(rules.len());
    for (i, rule) in rules.iter().take(shown).enumerate() {
        println!("  {:>4}. {rule}", i + 1);
    }
    if shown < rules.len() {
        println!("  ... {} more", rules.len() - shown);
    }
}

fn print_unexplained(unexplained: &[(BoardState, MoveSet)], limit: usize) {
    for (state, moves) in unexplained.iter().take(limit) {
        println!("  {} ({} to move): {moves}", state.key(), state.to_move);
    }
    if unexplained.len() > limit {
        println!("  ... {} more", unexplained.len() - limit);
    }
}
