//! Inspect command - show what a saved table has learned

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    adapters::JsonTableRepository,
    cli::output::{format_number, print_kv, print_section, print_subsection},
    ports::TableRepository,
    q_learning::ValueTable,
    types::Action,
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a saved value table")]
pub struct InspectArgs {
    /// Path to the table file
    #[arg(default_value = "q_table.json")]
    pub table: PathBuf,

    /// Only show states whose key contains this text
    #[arg(long)]
    pub state: Option<String>,

    /// Emit a JSON summary instead of text
    #[arg(long)]
    pub json: bool,
}

/// Greedy view of one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummary {
    pub state: String,
    pub greedy: Vec<Action>,
    pub max_value: f64,
    pub values: Vec<(Action, f64)>,
}

/// Per-state greedy summaries, optionally filtered by key substring.
pub fn summarize(table: &ValueTable, filter: Option<&str>) -> Vec<StateSummary> {
    table
        .iter()
        .filter(|(state, _)| filter.is_none_or(|needle| state.as_str().contains(needle)))
        .map(|(state, row)| StateSummary {
            state: state.to_string(),
            greedy: row.best_actions(),
            max_value: row.max_value(),
            values: row.iter().collect(),
        })
        .collect()
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let table = JsonTableRepository::new()
        .load(&args.table)
        .with_context(|| format!("Failed to load table: {}", args.table.display()))?;
    let summaries = summarize(&table, args.state.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    print_section(&format!("Value table: {}", args.table.display()));
    print_kv("States", &format_number(table.len() as u64));
    if let Some(filter) = &args.state {
        print_kv("Matching", &format!("{} ('{filter}')", summaries.len()));
    }

    for summary in &summaries {
        print_subsection(&summary.state);
        for (action, value) in &summary.values {
            let marker = if summary.greedy.contains(action) { "*" } else { " " };
            print_kv(&format!("{marker} {action}"), &format!("{value:.4}"));
        }
    }
    Ok(())
}
