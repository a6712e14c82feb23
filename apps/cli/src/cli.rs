use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Resolve a tenant and plan a day of meals.
#[derive(Debug, Parser)]
#[command(name = "mplan", version, about)]
pub struct Cli {
    /// Configuration file; `planner.toml` in the working directory when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Location of the client, e.g. `https://veggie.planner.app/?tenant=veggie`.
    #[arg(short, long)]
    pub url: Option<String>,

    /// Resolve as a prerender pass: no location, no cache.
    #[arg(long, conflicts_with = "url")]
    pub prerender: bool,

    /// Interaction to replay, in order: `category=meal`, `category=` for none,
    /// or a bare `category` when the control reports nothing.
    #[arg(short, long = "select", value_name = "CATEGORY[=MEAL]", value_parser = parse_selection)]
    pub selections: Vec<Selection>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List registered tenants.
    Tenants,
}

/// One replayed interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub category: String,
    pub meal_id: Option<String>,
}

/// Parses `category=meal`, `category=` and `category`.
///
/// # Errors
/// Fails when the category part is empty.
pub fn parse_selection(raw: &str) -> Result<Selection, String> {
    let (category, meal_id) = match raw.split_once('=') {
        Some((category, meal)) => (category, Some(meal.to_owned())),
        None => (raw, None),
    };
    let category = category.trim();
    if category.is_empty() {
        return Err(format!("missing category in '{raw}'"));
    }
    Ok(Selection { category: category.to_owned(), meal_id })
}
