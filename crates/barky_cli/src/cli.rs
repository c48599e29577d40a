//! Command-line argument definitions.

use barky_core::BookmarkId;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Barky - keep bookmarks in a local SQLite file.
#[derive(Parser, Debug)]
#[command(name = "barky")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file (created on first use)
    #[arg(long, env = "BARKY_DB", default_value = "barky.sqlite3")]
    pub db: PathBuf,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "BARKY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, env = "BARKY_LOG_DIR")]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a bookmark
    Add(AddArgs),

    /// List all bookmarks, oldest first
    List(OutputArgs),

    /// Show one bookmark
    Show {
        id: BookmarkId,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Replace title, url and notes of a bookmark
    Edit {
        id: BookmarkId,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a bookmark
    Delete { id: BookmarkId },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Explicit id; the next free id is used when omitted
    #[arg(long)]
    pub id: Option<BookmarkId>,

    /// Creation date as YYYY-MM-DD; defaults to today
    #[arg(long)]
    pub date_added: Option<NaiveDate>,

    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Args, Debug)]
pub struct FieldArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub url: String,

    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Print JSON instead of tab-separated lines
    #[arg(long)]
    pub json: bool,
}
