//! In-memory game store: CRUD operations plus search, filter, and sort views.
//!
//! The store owns the authoritative collection for the process lifetime and
//! flushes it to its [`Document`] after every successful mutation. A rejected
//! or failed operation leaves both the collection and the document untouched.

use std::cmp::Ordering;

use thiserror::Error;

use crate::document::{Document, DocumentError};
use crate::types::{Game, Status, ValidationError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no game with id {id}")]
    NotFound { id: u64 },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

// ── Operation inputs ────────────────────────────────────────────────────────

/// Input for [`GameStore::add`]. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub title: String,
    pub status: Status,
    pub rating: Option<u8>,
    pub notes: Option<String>,
}

impl NewGame {
    /// A backlog entry with just a title.
    pub fn to_play(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: Status::ToPlay,
            rating: None,
            notes: None,
        }
    }

    /// An already-finished entry with its rating.
    pub fn completed(title: impl Into<String>, rating: u8) -> Self {
        Self {
            title: title.into(),
            status: Status::Completed,
            rating: Some(rating),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial field changes for [`GameStore::update`]. `None` leaves a field
/// unchanged; an empty `notes` string clears the notes.
///
/// Ratings are never cleared directly: moving a game back to `to_play`
/// clears its rating as part of the status change.
#[derive(Debug, Clone, Default)]
pub struct GamePatch {
    pub title: Option<String>,
    pub status: Option<Status>,
    pub rating: Option<u8>,
    pub notes: Option<String>,
}

/// Sort key for [`GameStore::sorted`] views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive lexicographic title order.
    Title,
    /// Fixed enum order: `to_play` before `completed`.
    Status,
    /// Numeric rating order; unrated records always sort last.
    Rating,
}

/// Error returned when a string cannot be parsed into a [`SortKey`].
#[derive(Debug, Clone, Error)]
#[error("unknown sort key: '{0}' (expected 'title', 'status', or 'rating')")]
pub struct SortKeyParseError(pub String);

impl std::str::FromStr for SortKey {
    type Err = SortKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            "rating" => Ok(Self::Rating),
            _ => Err(SortKeyParseError(s.to_string())),
        }
    }
}

// ── Store ───────────────────────────────────────────────────────────────────

/// The authoritative in-memory collection, backed by a [`Document`].
pub struct GameStore {
    document: Document,
    games: Vec<Game>,
    next_id: u64,
}

impl GameStore {
    /// Load the persisted collection and build a store over it.
    ///
    /// Ids are assigned from a monotonic counter seeded past the highest
    /// stored id, so an id deleted in this session is never handed out again.
    pub fn open(document: Document) -> Result<Self, StoreError> {
        let games = document.load()?;
        let next_id = games.iter().map(|g| g.id).max().map_or(1, |max| max + 1);
        Ok(Self {
            document,
            games,
            next_id,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    // ── Mutations ───────────────────────────────────────────────────────────

    /// Add a new game and persist the collection. Returns the stored record
    /// with its freshly assigned id.
    ///
    /// Unlike [`GameStore::update`], adding a completed game requires a
    /// rating up front.
    pub fn add(&mut self, new: NewGame) -> Result<&Game, StoreError> {
        if new.status == Status::Completed && new.rating.is_none() {
            return Err(ValidationError::MissingRating.into());
        }

        let game = Game {
            id: self.next_id,
            title: new.title.trim().to_string(),
            status: new.status,
            rating: new.rating,
            notes: normalize_notes(new.notes),
        };
        game.check()?;

        let idx = self.games.len();
        self.games.push(game);
        if let Err(e) = self.document.save(&self.games) {
            self.games.pop();
            return Err(e.into());
        }
        self.next_id += 1;
        Ok(&self.games[idx])
    }

    /// Apply partial field changes to the game with `id` and persist.
    ///
    /// Status is applied before rating, so a patch that moves a game back to
    /// `to_play` clears the old rating, and a patch that both shelves a game
    /// and supplies a rating is rejected. Moving to `completed` without a
    /// rating is allowed; the rating stays unset until a later update.
    pub fn update(&mut self, id: u64, patch: GamePatch) -> Result<&Game, StoreError> {
        let idx = self.index_of(id)?;
        let mut updated = self.games[idx].clone();

        if let Some(title) = patch.title {
            updated.title = title.trim().to_string();
        }
        if let Some(status) = patch.status {
            if status == Status::ToPlay {
                updated.rating = None;
            }
            updated.status = status;
        }
        if let Some(rating) = patch.rating {
            updated.rating = Some(rating);
        }
        if let Some(notes) = patch.notes {
            updated.notes = normalize_notes(Some(notes));
        }
        updated.check()?;

        let previous = std::mem::replace(&mut self.games[idx], updated);
        if let Err(e) = self.document.save(&self.games) {
            self.games[idx] = previous;
            return Err(e.into());
        }
        Ok(&self.games[idx])
    }

    /// Remove the game with `id`, persist, and return the removed record.
    pub fn delete(&mut self, id: u64) -> Result<Game, StoreError> {
        let idx = self.index_of(id)?;
        let removed = self.games.remove(idx);
        if let Err(e) = self.document.save(&self.games) {
            self.games.insert(idx, removed);
            return Err(e.into());
        }
        Ok(removed)
    }

    /// Mark a game completed, optionally supplying its rating in the same
    /// operation.
    pub fn complete(&mut self, id: u64, rating: Option<u8>) -> Result<&Game, StoreError> {
        self.update(
            id,
            GamePatch {
                status: Some(Status::Completed),
                rating,
                ..GamePatch::default()
            },
        )
    }

    /// Move a game back to the backlog, clearing any rating.
    pub fn shelve(&mut self, id: u64) -> Result<&Game, StoreError> {
        self.update(
            id,
            GamePatch {
                status: Some(Status::ToPlay),
                ..GamePatch::default()
            },
        )
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn get(&self, id: u64) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Exact title match, case-insensitive.
    pub fn find_by_title(&self, title: &str) -> Option<&Game> {
        let needle = title.trim().to_lowercase();
        self.games.iter().find(|g| g.title.to_lowercase() == needle)
    }

    /// Games whose title contains `text`, case-insensitively. Empty or
    /// whitespace-only text matches everything. Insertion order preserved.
    pub fn search(&self, text: &str) -> Vec<&Game> {
        let needle = text.trim();
        if needle.is_empty() {
            return self.games.iter().collect();
        }
        self.games
            .iter()
            .filter(|g| g.title_contains(needle))
            .collect()
    }

    /// Games matching `status`, or all games when `None`. Insertion order
    /// preserved.
    pub fn filter(&self, status: Option<Status>) -> Vec<&Game> {
        self.games
            .iter()
            .filter(|g| status.is_none_or(|s| g.status == s))
            .collect()
    }

    /// A sorted view of the collection. The stored order is not touched.
    ///
    /// Unrated games sort after all rated ones regardless of direction, and
    /// ties always break by ascending id, so the view is deterministic.
    pub fn sorted(&self, key: SortKey, ascending: bool) -> Vec<&Game> {
        let mut view: Vec<&Game> = self.games.iter().collect();
        view.sort_by(|a, b| {
            let ord = match key {
                SortKey::Title => {
                    directed(a.title.to_lowercase().cmp(&b.title.to_lowercase()), ascending)
                }
                SortKey::Status => directed(a.status.cmp(&b.status), ascending),
                SortKey::Rating => match (a.rating, b.rating) {
                    (Some(x), Some(y)) => directed(x.cmp(&y), ascending),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                },
            };
            ord.then_with(|| a.id.cmp(&b.id))
        });
        view
    }

    /// The full collection in insertion order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    fn index_of(&self, id: u64) -> Result<usize, StoreError> {
        self.games
            .iter()
            .position(|g| g.id == id)
            .ok_or(StoreError::NotFound { id })
    }
}

fn directed(ord: Ordering, ascending: bool) -> Ordering {
    if ascending { ord } else { ord.reverse() }
}

/// Empty or whitespace-only notes collapse to `None`.
fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}
