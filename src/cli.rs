//! Command-line arguments for the headless front end.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Golem - send HTTP requests and keep a searchable local history.
#[derive(Parser, Debug)]
#[command(name = "golem", version, about)]
pub struct CliArgs {
    /// Directory holding golem.db (default: ~/.golem, or $GOLEM_DATA_DIR).
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a request and record it in history.
    Send {
        method: String,
        url: String,
    },
    /// Show recent history, newest first.
    History {
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long)]
        offset: Option<i64>,
    },
    /// Search history by URL, method or status (case-sensitive).
    Search {
        term: String,
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Delete one history entry.
    Forget { id: i64 },
    /// Delete all history.
    ClearHistory,
    /// Write history to a JSON file.
    Export { path: PathBuf },
    /// Load history from a JSON file.
    Import { path: PathBuf },
    /// Manage collections.
    #[command(subcommand)]
    Collections(CollectionCommand),
    /// Manage saved requests.
    #[command(subcommand)]
    Saved(SavedCommand),
    /// Read and write preferences.
    #[command(subcommand)]
    Prefs(PrefsCommand),
}

#[derive(Subcommand, Debug)]
pub enum CollectionCommand {
    List,
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum SavedCommand {
    /// List saved requests in a collection, or those without one.
    List {
        #[arg(long)]
        collection: Option<i64>,
    },
    Add {
        name: String,
        method: String,
        url: String,
        #[arg(long)]
        collection: Option<i64>,
    },
    Show { id: i64 },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommand {
    List,
    Get { key: String },
    Set { key: String, value: String },
}
