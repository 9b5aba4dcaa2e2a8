//! Data structures shared by the command parser and the rating engine.

/// A player referenced by a Slack mention token `<@ID|NAME>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlayerRef {
    /// Stable Slack user id, e.g. `U024BE7LH`
    pub id: String,
    /// Display label captured from the mention
    pub name: String,
}

/// One participant of a match together with its rating before and after.
///
/// `old_rating` is hydrated by the [`RatingStore`](crate::store::RatingStore),
/// `new_rating` mirrors it until the rating engine runs.
#[derive(Clone, Debug, PartialEq)]
pub struct RosterEntry {
    /// Player of this entry
    pub player: PlayerRef,
    /// Rating before the match
    pub old_rating: f64,
    /// Rating after the match
    pub new_rating: f64,
}

impl RosterEntry {
    /// Creates an entry whose old and new ratings are both `rating`.
    pub fn new(player: PlayerRef, rating: f64) -> Self {
        RosterEntry {
            player,
            old_rating: rating,
            new_rating: rating,
        }
    }

    /// Signed rating change of this entry.
    pub fn delta(&self) -> f64 {
        self.new_rating - self.old_rating
    }
}

/// Outcome of a single match: one winning and one losing roster.
///
/// Both rosters are non-empty, of equal size and share no player.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    /// Winning roster
    pub winners: Vec<RosterEntry>,
    /// Losing roster
    pub losers: Vec<RosterEntry>,
}

impl MatchResult {
    /// Iterates over `winners` then `losers`.
    pub fn participants(&self) -> impl Iterator<Item = &RosterEntry> {
        self.winners.iter().chain(self.losers.iter())
    }

    /// Mutable counterpart of [`Self::participants`].
    pub fn participants_mut(&mut self) -> impl Iterator<Item = &mut RosterEntry> {
        self.winners.iter_mut().chain(self.losers.iter_mut())
    }

    /// Ids of every participant, winners first.
    pub fn player_ids(&self) -> Vec<String> {
        self.participants().map(|e| e.player.id.clone()).collect()
    }
}
