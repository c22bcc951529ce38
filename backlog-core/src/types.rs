//! Data model types for the game backlog.
//!
//! These types define the persistent record schema: one [`Game`] per tracked
//! title, with a progress [`Status`] and an optional 1-10 rating.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest rating a completed game can carry.
pub const RATING_MIN: u8 = 1;
/// Highest rating a completed game can carry.
pub const RATING_MAX: u8 = 10;

// ── Status ──────────────────────────────────────────────────────────────────

/// Progress state of a tracked game.
///
/// Variant order is the fixed sort order: `to_play` before `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    ToPlay,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToPlay => "to_play",
            Self::Completed => "completed",
        }
    }

    /// Accepted spellings for each variant, all lowercase.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::ToPlay => &["to_play", "to-play", "to play", "tbp", "backlog"],
            Self::Completed => &["completed", "complete", "done", "finished"],
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string cannot be parsed into a [`Status`].
#[derive(Debug, Clone, Error)]
#[error("unknown status: '{0}' (expected 'to_play' or 'completed')")]
pub struct StatusParseError(pub String);

impl std::str::FromStr for Status {
    type Err = StatusParseError;

    /// Parse a status from any recognized spelling (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        for status in [Self::ToPlay, Self::Completed] {
            if status.aliases().contains(&lower.as_str()) {
                return Ok(status);
            }
        }
        Err(StatusParseError(s.to_string()))
    }
}

// ── Game ────────────────────────────────────────────────────────────────────

/// One tracked game entry.
///
/// `rating` and `notes` serialize as `null` when unset so the on-disk
/// document always carries all five fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Unique, stable identifier assigned at creation. Never changes.
    pub id: u64,
    pub title: String,
    pub status: Status,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Game {
    /// Check the record invariants: non-empty title, and a rating only on
    /// completed games, within 1-10.
    ///
    /// A completed game with no rating is valid: the rating may arrive in a
    /// later update.
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if let Some(rating) = self.rating {
            if self.status != Status::Completed {
                return Err(ValidationError::RatingWithoutCompletion);
            }
            if !(RATING_MIN..=RATING_MAX).contains(&rating) {
                return Err(ValidationError::RatingOutOfRange(rating));
            }
        }
        Ok(())
    }

    /// Case-insensitive substring match against the title.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}

// ── Validation ──────────────────────────────────────────────────────────────

/// A record-level invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("only completed games can carry a rating")]
    RatingWithoutCompletion,

    #[error("rating {0} is out of range ({RATING_MIN}-{RATING_MAX})")]
    RatingOutOfRange(u8),

    #[error("completed games must be given a rating ({RATING_MIN}-{RATING_MAX})")]
    MissingRating,
}
