//! Implementations of the CLI subcommands.

use backlog_core::{Game, GamePatch, GameStore, NewGame, SortKey, Status, StoreError};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

const CHECK: &str = "\u{2714}";

pub(crate) fn run_add(
    store: &mut GameStore,
    title: String,
    status: Status,
    rating: Option<u8>,
    notes: Option<String>,
) -> Result<(), StoreError> {
    let game = store.add(NewGame {
        title,
        status,
        rating,
        notes,
    })?;
    println!(
        "{} Added \"{}\" (id {})",
        CHECK.if_supports_color(Stdout, |t| t.green()),
        game.title,
        game.id,
    );
    Ok(())
}

pub(crate) fn run_list(
    store: &GameStore,
    status: Option<Status>,
    find: Option<&str>,
    sort: SortKey,
    ascending: bool,
) {
    let mut games = store.sorted(sort, ascending);
    if let Some(status) = status {
        games.retain(|g| g.status == status);
    }
    if let Some(needle) = find.map(str::trim).filter(|n| !n.is_empty()) {
        games.retain(|g| g.title_contains(needle));
    }

    if games.is_empty() {
        println!("No games to show ({} total).", store.len());
        return;
    }

    let header = format!(
        "{:>4}  {:<40}  {:<10}  {:>6}  {}",
        "ID", "Title", "Status", "Rating", "Notes",
    );
    println!("{}", header.if_supports_color(Stdout, |t| t.bold()));
    for game in &games {
        print_row(game);
    }
    println!();
    println!("{} game(s) shown ({} total)", games.len(), store.len());
}

pub(crate) fn run_update(
    store: &mut GameStore,
    id: u64,
    title: Option<String>,
    status: Option<Status>,
    rating: Option<u8>,
    notes: Option<String>,
) -> Result<(), StoreError> {
    let game = store.update(
        id,
        GamePatch {
            title,
            status,
            rating,
            notes,
        },
    )?;
    println!(
        "{} Updated \"{}\" (id {})",
        CHECK.if_supports_color(Stdout, |t| t.green()),
        game.title,
        game.id,
    );
    Ok(())
}

pub(crate) fn run_complete(
    store: &mut GameStore,
    id: u64,
    rating: Option<u8>,
) -> Result<(), StoreError> {
    let game = store.complete(id, rating)?;
    match game.rating {
        Some(rating) => println!(
            "{} Marked \"{}\" as completed, rated {}/10",
            CHECK.if_supports_color(Stdout, |t| t.green()),
            game.title,
            rating,
        ),
        None => println!(
            "{} Marked \"{}\" as completed (no rating yet)",
            CHECK.if_supports_color(Stdout, |t| t.green()),
            game.title,
        ),
    }
    Ok(())
}

pub(crate) fn run_shelve(store: &mut GameStore, id: u64) -> Result<(), StoreError> {
    let game = store.shelve(id)?;
    println!(
        "{} Moved \"{}\" back to the backlog",
        CHECK.if_supports_color(Stdout, |t| t.green()),
        game.title,
    );
    Ok(())
}

pub(crate) fn run_delete(store: &mut GameStore, id: u64) -> Result<(), StoreError> {
    let game = store.delete(id)?;
    println!(
        "{} Deleted \"{}\" (id {})",
        CHECK.if_supports_color(Stdout, |t| t.green()),
        game.title,
        game.id,
    );
    Ok(())
}

fn print_row(game: &Game) {
    let rating = game
        .rating
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());
    let notes = game.notes.as_deref().unwrap_or("");

    // Pad before coloring: ANSI escapes would throw the column widths off.
    let status = format!("{:<10}", game.status.as_str());
    match game.status {
        Status::ToPlay => println!(
            "{:>4}  {:<40}  {}  {:>6}  {}",
            game.id,
            truncate_str(&game.title, 40),
            status.if_supports_color(Stdout, |t| t.yellow()),
            rating,
            truncate_str(notes, 30),
        ),
        Status::Completed => println!(
            "{:>4}  {:<40}  {}  {:>6}  {}",
            game.id,
            truncate_str(&game.title, 40),
            status.if_supports_color(Stdout, |t| t.green()),
            rating,
            truncate_str(notes, 30),
        ),
    }
}

/// Truncate a string to `max` characters, appending "..." when cut.
fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
