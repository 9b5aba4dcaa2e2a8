//! JSON file backend for player ratings.

use std::{
    collections::{BTreeMap, HashMap},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};

use crate::{
    rating::MatchResult,
    store::{RatingStore, StoreError},
};

/// Stored state of a single player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct PlayerRecord {
    /// Last known display name
    name: String,
    /// Current rating
    rating: f64,
}

type RatingsMap = BTreeMap<String, PlayerRecord>;

/// Keeps ratings in a JSON object keyed by player id:
///
/// ```json
/// { "U1": { "name": "alice", "rating": 1016.0 } }
/// ```
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let store = JsonRatingStore::new("./data/ratings.json".into(), 1000.0);
/// let ratings = store.load(&["U1".to_string()]).await.unwrap();
/// # }
/// ```
pub struct JsonRatingStore {
    /// Path to the ratings file
    path: PathBuf,
    /// Rating of a player seen for the first time
    default_rating: f64,
}

impl JsonRatingStore {
    /// Creates a new [`JsonRatingStore`].
    ///
    /// # Arguments
    ///
    /// * `path` - File where ratings are read from and written to
    /// * `default_rating` - Rating of players missing from the file
    pub fn new(path: PathBuf, default_rating: f64) -> Self {
        JsonRatingStore {
            path,
            default_rating,
        }
    }

    /// Reads the whole ratings file. A missing file is an empty map.
    async fn read_ratings(&self) -> Result<RatingsMap, StoreError> {
        let serialized = match fs::read_to_string(&self.path).await {
            Ok(serialized) => serialized,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "no ratings file at {}, starting with empty ratings",
                    self.path.display()
                );
                return Ok(RatingsMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&serialized)?)
    }

    /// Replaces the ratings file through a temporary file and a rename.
    ///
    /// The temporary file and, on unix, the parent directory are synced to
    /// disk, so the new ratings survive a crash once this returns.
    async fn write_ratings(&self, ratings: &RatingsMap) -> Result<(), StoreError> {
        let serialized = serde_json::to_string_pretty(ratings)?;
        let tmp_path = self.path.with_extension("json.tmp");
        let parent = self.path.parent().filter(|p| !p.as_os_str().is_empty());

        if let Some(parent) = parent {
            fs::create_dir_all(parent).await?;
        }

        let mut tmp_file = File::create(&tmp_path).await?;
        tmp_file.write_all(serialized.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).await?;

        // The rename itself is only durable once the directory entry is synced
        #[cfg(unix)]
        File::open(parent.unwrap_or(Path::new(".")))
            .await?
            .sync_all()
            .await?;

        debug!("synced ratings file {}", self.path.display());

        Ok(())
    }
}

impl RatingStore for JsonRatingStore {
    async fn load(&self, player_ids: &[String]) -> Result<HashMap<String, f64>, StoreError> {
        let stored = self.read_ratings().await?;

        let ratings = player_ids
            .iter()
            .map(|id| {
                let rating = stored
                    .get(id)
                    .map(|record| record.rating)
                    .unwrap_or(self.default_rating);
                (id.clone(), rating)
            })
            .collect::<HashMap<_, _>>();

        debug!("loaded ratings {:?}", ratings);

        Ok(ratings)
    }

    async fn save(&self, result: &MatchResult) -> Result<(), StoreError> {
        let mut stored = self.read_ratings().await?;

        for entry in result.participants() {
            stored.insert(
                entry.player.id.clone(),
                PlayerRecord {
                    name: entry.player.name.clone(),
                    rating: entry.new_rating,
                },
            );
        }

        self.write_ratings(&stored).await?;

        info!("persisted ratings of {} players", result.player_ids().len());

        Ok(())
    }
}
