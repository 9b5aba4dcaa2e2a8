//! Persistence of player ratings.
//!
//! The [`RatingStore`] trait is the seam between the command pipeline and the
//! storage backend. [`JsonRatingStore`] keeps every rating in a single JSON
//! file inside the data directory.

use std::collections::HashMap;

use mockall::automock;

use crate::rating::MatchResult;

mod json_store;

pub use crate::store::json_store::JsonRatingStore;

/// Errors raised while loading or saving ratings.
#[derive(Debug)]
pub enum StoreError {
    /// The ratings file could not be read or written
    Io(std::io::Error),
    /// The ratings file content is not valid
    Corrupted(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "ratings storage is unavailable: {}", e),
            StoreError::Corrupted(e) => write!(f, "ratings storage is corrupted: {}", e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupted(e)
    }
}

/// Loads and saves ratings by player id.
#[automock]
pub trait RatingStore {
    /// Returns the current rating of every requested player.
    ///
    /// Players without a stored rating get the store's default rating.
    async fn load(&self, player_ids: &[String]) -> Result<HashMap<String, f64>, StoreError>;
    /// Durably stores the new rating of every participant of `result`.
    async fn save(&self, result: &MatchResult) -> Result<(), StoreError>;
}
