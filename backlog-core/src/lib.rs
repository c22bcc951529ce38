//! Core library for the game backlog tracker.
//!
//! This crate owns the data model, the JSON document persistence adapter,
//! and the in-memory [`GameStore`] with its CRUD and query operations.
//! Consumers (the CLI, or any other front end) drive the store directly;
//! there is no database and no network dependency.

pub mod document;
pub mod store;
pub mod types;

pub use document::{DEFAULT_FILE_NAME, Document, DocumentError};
pub use store::{GamePatch, GameStore, NewGame, SortKey, SortKeyParseError, StoreError};
pub use types::{
    Game, RATING_MAX, RATING_MIN, Status, StatusParseError, ValidationError,
};
