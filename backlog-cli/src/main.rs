//! backlog CLI
//!
//! Command-line front end for the game backlog tracker. Every subcommand
//! maps onto one operation of the core game store.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use backlog_core::{Document, GameStore, SortKey, Status, StoreError};

#[derive(Parser)]
#[command(name = "backlog")]
#[command(about = "Track games to play and completed ones with ratings", long_about = None)]
struct Cli {
    /// Path to the collection document (defaults to ./games_data.json)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a game to the collection
    Add {
        /// Game title
        title: String,

        /// Initial status (to_play or completed)
        #[arg(short, long, default_value = "to_play")]
        status: Status,

        /// Rating 1-10 (completed games only)
        #[arg(short, long)]
        rating: Option<u8>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List games, optionally filtered and sorted
    List {
        /// Only show games with this status
        #[arg(short, long)]
        status: Option<Status>,

        /// Only show games whose title contains this text
        #[arg(short = 'F', long)]
        find: Option<String>,

        /// Sort by title, status, or rating
        #[arg(long, default_value = "title")]
        sort: SortKey,

        /// Sort descending (unrated games still sort last)
        #[arg(long)]
        desc: bool,
    },

    /// Change fields of an existing game
    Update {
        /// Id of the game to change
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New status; moving back to to_play clears the rating
        #[arg(short, long)]
        status: Option<Status>,

        /// New rating 1-10 (completed games only)
        #[arg(short, long)]
        rating: Option<u8>,

        /// New notes; an empty string clears them
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Mark a game as completed
    Complete {
        /// Id of the game to complete
        id: u64,

        /// Rating 1-10; may also be supplied later with 'update'
        #[arg(short, long)]
        rating: Option<u8>,
    },

    /// Move a game back to the to-play backlog, clearing its rating
    Shelve {
        /// Id of the game to shelve
        id: u64,
    },

    /// Remove a game from the collection
    Delete {
        /// Id of the game to remove
        id: u64,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let document = match cli.file {
        Some(path) => Document::new(path),
        None => Document::default(),
    };
    log::debug!("using document at {}", document.path().display());

    if let Err(e) = run(cli.command, document) {
        eprintln!(
            "{} {e}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red())
        );
        std::process::exit(1);
    }
}

fn run(command: Commands, document: Document) -> Result<(), StoreError> {
    let mut store = GameStore::open(document)?;

    match command {
        Commands::Add {
            title,
            status,
            rating,
            notes,
        } => commands::run_add(&mut store, title, status, rating, notes),
        Commands::List {
            status,
            find,
            sort,
            desc,
        } => {
            commands::run_list(&store, status, find.as_deref(), sort, !desc);
            Ok(())
        }
        Commands::Update {
            id,
            title,
            status,
            rating,
            notes,
        } => commands::run_update(&mut store, id, title, status, rating, notes),
        Commands::Complete { id, rating } => commands::run_complete(&mut store, id, rating),
        Commands::Shelve { id } => commands::run_shelve(&mut store, id),
        Commands::Delete { id } => commands::run_delete(&mut store, id),
    }
}
