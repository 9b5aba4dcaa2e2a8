//! Rating engine and render model.
//!
//! # Modules
//!
//! - `structs` - Players, roster entries and match results
//! - `engine` - Pairwise rating update with a fixed K-factor
//! - `render` - Slack attachments describing each participant's rating change
//!
//! # Examples
//!
//! ```no_run
//! let result = update_ratings(winners, losers);
//! let attachments = render_match_update(&result);
//! ```

pub(crate) mod engine;
pub(crate) mod render;
mod structs;

pub use crate::rating::engine::update_ratings;
pub use crate::rating::render::{Attachment, render_match_update};
pub use crate::rating::structs::{MatchResult, PlayerRef, RosterEntry};
