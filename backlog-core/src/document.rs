//! JSON document persistence for the game collection.
//!
//! The whole collection lives in one JSON array on disk. Saves replace the
//! file atomically (write to a temp file, then rename) so a crash mid-write
//! cannot leave a half-written document behind.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::Game;

/// Conventional file name for the collection document.
pub const DEFAULT_FILE_NAME: &str = "games_data.json";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The file exists but does not hold a valid collection. Surfaced to the
    /// caller instead of being treated as empty, so data is never silently
    /// discarded.
    #[error("corrupt data file {path}: {detail}")]
    Corrupt { path: String, detail: String },
}

/// Handle to the on-disk collection document.
pub struct Document {
    path: PathBuf,
}

impl Default for Document {
    /// Document at the conventional path in the current working directory.
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl Document {
    /// Create a handle for the document at `path`. Nothing is read until
    /// [`Document::load`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored collection, or an empty one when no file exists yet.
    ///
    /// A file that cannot be parsed as a game array, or whose records break
    /// the model invariants (duplicate ids, empty titles, ratings on
    /// unfinished games), fails with [`DocumentError::Corrupt`].
    pub fn load(&self) -> Result<Vec<Game>, DocumentError> {
        if !self.path.exists() {
            log::debug!("no document at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| DocumentError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;
        let games: Vec<Game> =
            serde_json::from_str(&contents).map_err(|e| DocumentError::Corrupt {
                path: self.path.display().to_string(),
                detail: e.to_string(),
            })?;

        let mut seen = HashSet::new();
        for game in &games {
            game.check().map_err(|e| DocumentError::Corrupt {
                path: self.path.display().to_string(),
                detail: format!("record {}: {e}", game.id),
            })?;
            if !seen.insert(game.id) {
                return Err(DocumentError::Corrupt {
                    path: self.path.display().to_string(),
                    detail: format!("duplicate id {}", game.id),
                });
            }
        }

        log::debug!(
            "loaded {} record(s) from {}",
            games.len(),
            self.path.display()
        );
        Ok(games)
    }

    /// Overwrite the document with `games`, atomically.
    pub fn save(&self, games: &[Game]) -> Result<(), DocumentError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DocumentError::Io {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let payload = serde_json::to_vec_pretty(games).map_err(|e| DocumentError::Io {
            path: self.path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload).map_err(|e| DocumentError::Io {
            path: tmp.display().to_string(),
            source: e,
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| DocumentError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;

        log::debug!(
            "saved {} record(s) to {}",
            games.len(),
            self.path.display()
        );
        Ok(())
    }
}
