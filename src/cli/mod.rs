pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::TriggerPolicy;

#[derive(Parser)]
#[command(name = "hackstories")]
#[command(about = "Search Hacker News stories from the terminal", long_about = None)]
pub struct Cli {
    /// When to issue a search (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    pub trigger: Option<TriggerPolicy>,

    /// Path to the preferences database
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI
    Tui,
    /// Run one search and print the results
    Search {
        /// Term to search for; stored as the new last term. Defaults to the
        /// stored term.
        query: Option<String>,
    },
    /// Print the stored search term
    Term,
}
