//! `barky` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, optionally start file logging, open the database.
//! - Run exactly one bookmark command and print its result.

mod cli;

use anyhow::{anyhow, Context, Result};
use barky_core::db::open_db;
use barky_core::{
    default_log_level, init_logging, AddBookmarkCommand, DeleteBookmarkCommand, DomainBookmark,
    EditBookmarkCommand, GetBookmarkCommand, ListBookmarksCommand, SqliteBookmarkRepository,
};
use clap::Parser;
use cli::{AddArgs, Cli, Commands, FieldArgs};
use log::info;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        barky_core::core_version()
    );

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let repo = SqliteBookmarkRepository::try_new(&conn)?;

    match cli.command {
        Commands::Add(args) => {
            let bookmark = bookmark_from_add(args);
            let id = AddBookmarkCommand.execute(&repo, &bookmark)?;
            println!("{id}");
        }
        Commands::List(output) => {
            let bookmarks = ListBookmarksCommand.execute(&repo)?;
            if output.json {
                println!("{}", serde_json::to_string_pretty(&bookmarks)?);
            } else {
                for bookmark in &bookmarks {
                    println!("{}", format_line(bookmark));
                }
            }
        }
        Commands::Show { id, output } => {
            let bookmark = GetBookmarkCommand
                .execute(&repo, id)?
                .ok_or_else(|| anyhow!("bookmark not found: {id}"))?;
            if output.json {
                println!("{}", serde_json::to_string_pretty(&bookmark)?);
            } else {
                println!("{}", format_line(&bookmark));
            }
        }
        Commands::Edit { id, fields } => {
            let FieldArgs { title, url, notes } = fields;
            EditBookmarkCommand
                .execute(&repo, &DomainBookmark::with_id(id, title, url, notes))?;
        }
        Commands::Delete { id } => {
            DeleteBookmarkCommand.execute(&repo, &DomainBookmark::with_id(id, "", "", ""))?;
        }
    }

    Ok(())
}

fn bookmark_from_add(args: AddArgs) -> DomainBookmark {
    let FieldArgs { title, url, notes } = args.fields;
    let bookmark = match args.id {
        Some(id) => DomainBookmark::with_id(id, title, url, notes),
        None => DomainBookmark::new(title, url, notes),
    };
    match args.date_added {
        Some(date_added) => bookmark.with_date_added(date_added),
        None => bookmark,
    }
}

fn format_line(bookmark: &DomainBookmark) -> String {
    let id = bookmark.id.map(|id| id.to_string()).unwrap_or_default();
    format!(
        "{id}\t{}\t{}\t{}\t{}",
        bookmark.date_added, bookmark.title, bookmark.url, bookmark.notes
    )
}
